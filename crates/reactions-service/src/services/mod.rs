//! Vote and reaction features
//!
//! Each click runs the same sequence: debounce, in-flight guard, optional
//! veto, optimistic apply, write, then commit or roll back.

mod context;
mod debounce;
mod guard;
mod hooks;
mod outcome;
mod reaction;
mod vote;


pub use context::FeatureContext;
pub use debounce::Debouncer;
pub use guard::InFlightGuard;
pub use hooks::{HookContext, InteractionHooks, NoHooks};
pub use outcome::InteractionOutcome;
pub use reaction::ReactionService;
pub use vote::VoteService;
