//! Vote feature
//!
//! Handles like/dislike clicks on a post.

use reactions_common::ReactionsResult;
use reactions_core::{DomainError, InteractionKind, PostId, VoteChoice};
use tracing::{debug, info, instrument};

use super::context::FeatureContext;
use super::guard::InFlightGuard;
use super::hooks::HookContext;
use super::outcome::InteractionOutcome;
use crate::optimistic::apply_vote_change;

/// Vote feature
pub struct VoteService<'a> {
    ctx: &'a FeatureContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a FeatureContext) -> Self {
        Self { ctx }
    }

    /// Handle a click on the `choice` button of a post.
    ///
    /// Clicking the active button clears the vote; clicking the other one
    /// switches it. Write failures are reported through the notifier and
    /// hooks and come back as [`InteractionOutcome::RolledBack`]; only an
    /// unknown post or a missing button is an error.
    #[instrument(skip(self), fields(post_id = %post_id, choice = %choice))]
    pub async fn click(
        &self,
        post_id: &PostId,
        choice: VoteChoice,
    ) -> ReactionsResult<InteractionOutcome<VoteChoice>> {
        let handle = self
            .ctx
            .registry()
            .get(post_id)
            .ok_or_else(|| DomainError::UnknownPost(post_id.to_string()))?;

        if handle.lock().button(choice).is_none() {
            let button = match choice {
                VoteChoice::Like => "upvote",
                VoteChoice::Dislike => "downvote",
            };
            return Err(DomainError::MissingVoteButton(button).into());
        }

        if !self.ctx.debouncer().settle(post_id, InteractionKind::Vote).await {
            debug!("Superseded by a later click");
            return Ok(InteractionOutcome::Debounced);
        }

        let Some(_guard) = InFlightGuard::acquire(self.ctx.store(), post_id, InteractionKind::Vote)
        else {
            debug!("Vote already in flight");
            return Ok(InteractionOutcome::Busy);
        };

        let removing = handle.lock().is_vote_active(choice);
        let target = (!removing).then_some(choice);
        let previous = self.ctx.store().vote_choice(post_id);

        if !self.ctx.hooks().before_vote(post_id, target).await {
            info!("Vote vetoed by hook");
            return Ok(InteractionOutcome::Vetoed);
        }

        let update_id = self.ctx.config().ui.optimistic_updates.then(|| {
            self.ctx
                .ledger()
                .apply_vote_update(post_id, &handle, choice, removing, previous)
        });

        match self.ctx.backend().put_vote(post_id, target).await {
            Ok(()) => {
                self.ctx.store().set_vote(post_id, target);
                if let Some(update_id) = update_id {
                    self.ctx.ledger().commit(&update_id);
                } else {
                    let mut view = handle.lock();
                    apply_vote_change(&mut view, choice, removing, previous);
                    self.ctx.render(post_id, &view);
                }
                self.ctx.hooks().after_vote(post_id, target, true);

                info!(vote = ?target, "Vote saved");
                Ok(InteractionOutcome::Committed(target))
            }
            Err(e) => {
                if let Some(update_id) = update_id {
                    self.ctx.ledger().rollback(&update_id);
                }
                self.ctx.report_failure(
                    &e,
                    &HookContext::new(InteractionKind::Vote, post_id.clone()),
                );
                self.ctx.hooks().after_vote(post_id, target, false);
                Ok(InteractionOutcome::RolledBack)
            }
        }
    }
}
