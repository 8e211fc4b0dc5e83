//! Page wiring
//!
//! Scans a page for posts, registers their view models, and loads the
//! existing votes and reactions.

mod orchestrator;
mod reconcile;
mod static_page;

pub use orchestrator::{LoadStatus, LoadSummary, ReactionsPage, ReactionsPageBuilder};
pub use static_page::StaticPage;
