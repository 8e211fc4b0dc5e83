//! Bulk-load reconciliation
//!
//! Counts and the viewer's own choice overwrite the zero placeholders of
//! every registered post. Posts with no records are reset to zero; records
//! for unregistered posts are ignored.

use reactions_core::{tally_reactions, tally_votes, ReactionRecord, UserId, VoteRecord};

use crate::services::FeatureContext;

pub(crate) fn apply_votes(ctx: &FeatureContext, records: &[VoteRecord], viewer: Option<UserId>) {
    let tallies = tally_votes(records, viewer);

    for (post_id, handle) in ctx.registry().entries() {
        let tally = tallies.get(&post_id).cloned().unwrap_or_default();
        ctx.store().set_vote(&post_id, tally.own);

        let mut view = handle.lock();
        view.set_votes(tally.likes, tally.dislikes, tally.own);
        ctx.render(&post_id, &view);
    }
}

pub(crate) fn apply_reactions(
    ctx: &FeatureContext,
    records: &[ReactionRecord],
    viewer: Option<UserId>,
) {
    let tallies = tally_reactions(records, viewer);

    for (post_id, handle) in ctx.registry().entries() {
        let tally = tallies.get(&post_id).cloned().unwrap_or_default();
        ctx.store().set_reaction(&post_id, tally.own.clone());

        let mut view = handle.lock();
        view.set_reactions(&tally.counts, tally.own.as_ref());
        ctx.render(&post_id, &view);
    }
}
