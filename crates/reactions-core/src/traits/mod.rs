//! Collaborator traits (ports) - what the core needs from the hosting page

mod page;
mod render;

pub use page::{default_post_id, PageSource, PostContainer, PostIdFn, ScannedPost};
pub use render::{NoopRenderer, Renderer};
