//! Optimistic updates
//!
//! View mutations are applied before the server confirms them and undone
//! from a snapshot if the write fails.

mod ledger;
mod mutation;

pub use ledger::OptimisticLedger;
pub use mutation::{apply_reaction_change, apply_vote_change};
