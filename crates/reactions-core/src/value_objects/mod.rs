//! Value objects - immutable types that represent domain concepts

mod choice;
mod identifiers;

pub use choice::{InteractionKind, ReactionKind, VoteChoice, VoteMode};
pub use identifiers::{PostId, TopicId, UserId};
