//! # reactions-core
//!
//! Domain layer containing post identifiers, vote and reaction choices, the
//! in-memory post view model, server records, and collaborator traits.
//! This crate has zero dependencies on infrastructure (HTTP, async runtime, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    tally_reactions, tally_votes, ButtonState, CompactView, PostView, ReactionOption,
    ReactionRecord, ReactionTally, UserInfo, VoteRecord, VoteTally,
};
pub use error::DomainError;
pub use traits::{
    default_post_id, PageSource, PostContainer, PostIdFn, Renderer, ScannedPost, NoopRenderer,
};
pub use value_objects::{InteractionKind, PostId, ReactionKind, TopicId, UserId, VoteChoice, VoteMode};
