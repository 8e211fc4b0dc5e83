//! # reactions-service
//!
//! Application layer: per-post interaction state, the optimistic update
//! ledger, the vote and reaction features, and the page orchestrator that
//! wires them to a scanned page.

pub mod optimistic;
pub mod page;
pub mod services;
pub mod state;

pub use optimistic::{apply_reaction_change, apply_vote_change, OptimisticLedger};
pub use page::{LoadStatus, LoadSummary, ReactionsPage, ReactionsPageBuilder, StaticPage};
pub use services::{
    Debouncer, FeatureContext, HookContext, InFlightGuard, InteractionHooks, InteractionOutcome,
    NoHooks, ReactionService, VoteService,
};
pub use state::{Choice, InteractionStateStore, PostHandle, PostRegistry};
