//! # reactions-client
//!
//! Talks to the reactions service: bulk reads of votes and reactions, and
//! per-post writes, all behind a bounded retry policy.

pub mod api;
pub mod backend;
pub mod location;
pub mod retry;

pub use api::ReactionsApi;
pub use backend::{Authenticator, ReactionsBackend, StaticTokenAuthenticator};
pub use location::{user_from_profile_link, PageLocation};
pub use retry::{with_retry, RetryClassify, RetryPolicy};
