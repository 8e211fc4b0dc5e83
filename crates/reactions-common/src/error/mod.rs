//! Error types

mod reactions_error;

pub use reactions_error::{ReactionsError, ReactionsResult};
