//! Optimistic update ledger
//!
//! Every speculative change records a snapshot of the controls it touched,
//! keyed by an update id. Commit forgets the snapshot; rollback restores it
//! exactly and re-renders the post.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use reactions_core::{
    ButtonState, InteractionKind, PostId, PostView, ReactionKind, Renderer, VoteChoice,
};
use tracing::debug;
use uuid::Uuid;

use super::mutation::{apply_reaction_change, apply_vote_change};
use crate::state::PostHandle;

#[derive(Debug, Clone)]
enum Snapshot {
    Vote {
        upvote: Option<ButtonState>,
        downvote: Option<ButtonState>,
    },
    Reaction(Vec<(ReactionKind, ButtonState)>),
}

impl Snapshot {
    fn votes(view: &PostView) -> Self {
        Self::Vote {
            upvote: view.upvote,
            downvote: view.downvote,
        }
    }

    fn reactions(view: &PostView) -> Self {
        Self::Reaction(
            view.reactions
                .iter()
                .map(|option| (option.kind.clone(), option.state))
                .collect(),
        )
    }

    fn restore(&self, view: &mut PostView) {
        match self {
            Self::Vote { upvote, downvote } => {
                view.upvote = *upvote;
                view.downvote = *downvote;
            }
            Self::Reaction(states) => {
                for (kind, state) in states {
                    if let Some(option) = view.option_mut(kind) {
                        option.state = *state;
                    }
                }
            }
        }
    }
}

struct PendingUpdate {
    kind: InteractionKind,
    post_id: PostId,
    handle: PostHandle,
    snapshot: Snapshot,
}

/// Pending optimistic updates of one page
pub struct OptimisticLedger {
    updates: Mutex<HashMap<String, PendingUpdate>>,
    renderer: Arc<dyn Renderer>,
}

impl OptimisticLedger {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            updates: Mutex::new(HashMap::new()),
            renderer,
        }
    }

    /// Speculatively apply a vote click and return its update id
    pub fn apply_vote_update(
        &self,
        post_id: &PostId,
        handle: &PostHandle,
        choice: VoteChoice,
        removing: bool,
        previous: Option<VoteChoice>,
    ) -> String {
        let snapshot = {
            let mut view = handle.lock();
            let snapshot = Snapshot::votes(&view);
            apply_vote_change(&mut view, choice, removing, previous);
            self.renderer.render(post_id, &view);
            snapshot
        };
        self.record(InteractionKind::Vote, post_id, handle, snapshot)
    }

    /// Speculatively apply a reaction click and return its update id
    pub fn apply_reaction_update(
        &self,
        post_id: &PostId,
        handle: &PostHandle,
        kind: &ReactionKind,
        removing: bool,
        previous: Option<&ReactionKind>,
    ) -> String {
        let snapshot = {
            let mut view = handle.lock();
            let snapshot = Snapshot::reactions(&view);
            if apply_reaction_change(&mut view, kind, removing, previous) {
                self.renderer.render(post_id, &view);
            }
            snapshot
        };
        self.record(InteractionKind::Reaction, post_id, handle, snapshot)
    }

    fn record(
        &self,
        kind: InteractionKind,
        post_id: &PostId,
        handle: &PostHandle,
        snapshot: Snapshot,
    ) -> String {
        let update_id = format!("{kind}-{post_id}-{}", Uuid::new_v4());
        self.updates.lock().insert(
            update_id.clone(),
            PendingUpdate {
                kind,
                post_id: post_id.clone(),
                handle: handle.clone(),
                snapshot,
            },
        );
        debug!(update_id = %update_id, "Optimistic update applied");
        update_id
    }

    /// Keep the speculative state. Returns `false` for unknown ids.
    pub fn commit(&self, update_id: &str) -> bool {
        self.updates.lock().remove(update_id).is_some()
    }

    /// Restore the snapshot taken for `update_id`. Returns `false` for
    /// unknown (already settled) ids.
    pub fn rollback(&self, update_id: &str) -> bool {
        let Some(update) = self.updates.lock().remove(update_id) else {
            return false;
        };
        self.restore(&update);
        debug!(update_id = %update_id, kind = %update.kind, "Optimistic update rolled back");
        true
    }

    /// Roll back every pending update of `post_id`. Returns how many were
    /// rolled back.
    pub fn rollback_all_for_post(&self, post_id: &PostId) -> usize {
        let pending: Vec<PendingUpdate> = {
            let mut updates = self.updates.lock();
            let ids: Vec<String> = updates
                .iter()
                .filter(|(_, update)| &update.post_id == post_id)
                .map(|(id, _)| id.clone())
                .collect();
            ids.iter().filter_map(|id| updates.remove(id)).collect()
        };

        // Vote and reaction snapshots cover disjoint controls
        for update in &pending {
            self.restore(update);
        }
        pending.len()
    }

    /// Forget every pending update without restoring anything
    pub fn clear(&self) {
        self.updates.lock().clear();
    }

    pub fn pending_count(&self) -> usize {
        self.updates.lock().len()
    }

    fn restore(&self, update: &PendingUpdate) {
        let mut view = update.handle.lock();
        update.snapshot.restore(&mut view);
        self.renderer.render(&update.post_id, &view);
    }
}
