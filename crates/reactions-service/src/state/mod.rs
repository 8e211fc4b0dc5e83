//! Shared per-page state

mod registry;
mod store;

pub use registry::{PostHandle, PostRegistry};
pub use store::{Choice, InteractionStateStore};
