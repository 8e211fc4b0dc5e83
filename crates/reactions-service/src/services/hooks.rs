//! Interaction hooks
//!
//! Extension points around every write. `before_*` may veto the action, in
//! which case no request is made.

use async_trait::async_trait;
use reactions_common::ReactionsError;
use reactions_core::{InteractionKind, PostId, ReactionKind, VoteChoice};

/// Where a failure happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    pub kind: InteractionKind,
    pub post_id: PostId,
}

impl HookContext {
    pub fn new(kind: InteractionKind, post_id: PostId) -> Self {
        Self { kind, post_id }
    }
}

/// Hooks called by the vote and reaction features. All methods default to
/// doing nothing (and allowing the action).
#[async_trait]
pub trait InteractionHooks: Send + Sync {
    /// `vote` is the value about to be written (`None` clears the vote)
    async fn before_vote(&self, _post_id: &PostId, _vote: Option<VoteChoice>) -> bool {
        true
    }

    fn after_vote(&self, _post_id: &PostId, _vote: Option<VoteChoice>, _success: bool) {}

    /// `reaction` is the value about to be written (`None` clears the reaction)
    async fn before_reaction(&self, _post_id: &PostId, _reaction: Option<&ReactionKind>) -> bool {
        true
    }

    fn after_reaction(&self, _post_id: &PostId, _reaction: Option<&ReactionKind>, _success: bool) {}

    fn on_error(&self, _error: &ReactionsError, _context: &HookContext) {}
}

/// No hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl InteractionHooks for NoHooks {}
