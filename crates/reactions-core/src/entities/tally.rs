//! Aggregation of bulk-read records into per-post counts

use std::collections::HashMap;

use super::record::{ReactionRecord, VoteRecord};
use crate::value_objects::{PostId, ReactionKind, UserId, VoteChoice};

/// Vote counts of one post plus the viewer's own vote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub likes: u32,
    pub dislikes: u32,
    pub own: Option<VoteChoice>,
}

/// Reaction counts of one post plus the viewer's own reaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionTally {
    pub counts: HashMap<ReactionKind, u32>,
    pub own: Option<ReactionKind>,
}

impl ReactionTally {
    pub fn count(&self, kind: &ReactionKind) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }
}

/// Group vote records by post. Records may arrive in any order; when the
/// viewer has several records on one post the last one wins.
pub fn tally_votes(records: &[VoteRecord], viewer: Option<UserId>) -> HashMap<PostId, VoteTally> {
    let mut by_post: HashMap<PostId, VoteTally> = HashMap::new();

    for record in records {
        let tally = by_post.entry(record.post_id.clone()).or_default();
        match record.vote_type {
            VoteChoice::Like => tally.likes += 1,
            VoteChoice::Dislike => tally.dislikes += 1,
        }
        if viewer == Some(record.user_id) {
            tally.own = Some(record.vote_type);
        }
    }

    by_post
}

/// Group reaction records by post and reaction kind
pub fn tally_reactions(
    records: &[ReactionRecord],
    viewer: Option<UserId>,
) -> HashMap<PostId, ReactionTally> {
    let mut by_post: HashMap<PostId, ReactionTally> = HashMap::new();

    for record in records {
        let tally = by_post.entry(record.post_id.clone()).or_default();
        *tally.counts.entry(record.reaction.clone()).or_insert(0) += 1;
        if viewer == Some(record.user_id) {
            tally.own = Some(record.reaction.clone());
        }
    }

    by_post
}
