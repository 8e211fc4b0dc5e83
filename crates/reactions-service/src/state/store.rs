//! Interaction state store
//!
//! Tracks, per post, the viewer's persisted vote and reaction and which
//! `(post, kind)` pairs have a write in flight. Holds no view state.

use dashmap::{DashMap, DashSet};
use reactions_core::{InteractionKind, PostId, ReactionKind, VoteChoice};

/// A persisted choice of either kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Vote(VoteChoice),
    Reaction(ReactionKind),
}

impl Choice {
    pub fn kind(&self) -> InteractionKind {
        match self {
            Self::Vote(_) => InteractionKind::Vote,
            Self::Reaction(_) => InteractionKind::Reaction,
        }
    }
}

/// Per-page interaction state
#[derive(Debug, Default)]
pub struct InteractionStateStore {
    choices: DashMap<(PostId, InteractionKind), Choice>,
    loading: DashSet<(PostId, InteractionKind)>,
}

impl InteractionStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Choices ===

    pub fn choice(&self, post_id: &PostId, kind: InteractionKind) -> Option<Choice> {
        self.choices
            .get(&(post_id.clone(), kind))
            .map(|entry| entry.value().clone())
    }

    /// Store `choice` for its kind
    pub fn set_choice(&self, post_id: &PostId, choice: Choice) {
        self.choices.insert((post_id.clone(), choice.kind()), choice);
    }

    pub fn clear_choice(&self, post_id: &PostId, kind: InteractionKind) {
        self.choices.remove(&(post_id.clone(), kind));
    }

    pub fn vote_choice(&self, post_id: &PostId) -> Option<VoteChoice> {
        match self.choice(post_id, InteractionKind::Vote) {
            Some(Choice::Vote(vote)) => Some(vote),
            _ => None,
        }
    }

    pub fn reaction_choice(&self, post_id: &PostId) -> Option<ReactionKind> {
        match self.choice(post_id, InteractionKind::Reaction) {
            Some(Choice::Reaction(kind)) => Some(kind),
            _ => None,
        }
    }

    pub fn set_vote(&self, post_id: &PostId, vote: Option<VoteChoice>) {
        match vote {
            Some(vote) => self.set_choice(post_id, Choice::Vote(vote)),
            None => self.clear_choice(post_id, InteractionKind::Vote),
        }
    }

    pub fn set_reaction(&self, post_id: &PostId, reaction: Option<ReactionKind>) {
        match reaction {
            Some(kind) => self.set_choice(post_id, Choice::Reaction(kind)),
            None => self.clear_choice(post_id, InteractionKind::Reaction),
        }
    }

    // === In-flight latch ===

    pub fn is_loading(&self, post_id: &PostId, kind: InteractionKind) -> bool {
        self.loading.contains(&(post_id.clone(), kind))
    }

    pub fn set_loading(&self, post_id: &PostId, kind: InteractionKind, loading: bool) {
        let key = (post_id.clone(), kind);
        if loading {
            self.loading.insert(key);
        } else {
            self.loading.remove(&key);
        }
    }

    /// Check-and-set the in-flight latch. Returns `false` if a write for
    /// this `(post, kind)` is already in flight.
    pub fn try_begin(&self, post_id: &PostId, kind: InteractionKind) -> bool {
        self.loading.insert((post_id.clone(), kind))
    }
}
