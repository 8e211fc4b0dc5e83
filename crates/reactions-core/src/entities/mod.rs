//! Domain entities - post views, server records and aggregates

mod record;
mod tally;
mod user;
mod view;

pub use record::{ReactionRecord, VoteRecord};
pub use tally::{tally_reactions, tally_votes, ReactionTally, VoteTally};
pub use user::UserInfo;
pub use view::{ButtonState, CompactView, PostView, ReactionOption};
