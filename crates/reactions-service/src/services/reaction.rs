//! Reaction feature
//!
//! Handles clicks on a post's reaction options. A viewer has at most one
//! reaction per post; picking another one switches it.

use reactions_common::ReactionsResult;
use reactions_core::{DomainError, InteractionKind, PostId, ReactionKind};
use tracing::{debug, info, instrument};

use super::context::FeatureContext;
use super::guard::InFlightGuard;
use super::hooks::HookContext;
use super::outcome::InteractionOutcome;
use crate::optimistic::apply_reaction_change;

/// Reaction feature
pub struct ReactionService<'a> {
    ctx: &'a FeatureContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a FeatureContext) -> Self {
        Self { ctx }
    }

    /// Handle a click on the `kind` option of a post.
    ///
    /// Kinds that are not configured are rejected before anything else
    /// happens.
    #[instrument(skip(self), fields(post_id = %post_id, reaction = %kind))]
    pub async fn click(
        &self,
        post_id: &PostId,
        kind: &ReactionKind,
    ) -> ReactionsResult<InteractionOutcome<ReactionKind>> {
        let handle = self
            .ctx
            .registry()
            .get(post_id)
            .ok_or_else(|| DomainError::UnknownPost(post_id.to_string()))?;

        if !self.ctx.config().customization.is_known_reaction(kind) || !handle.lock().has_reaction(kind) {
            return Err(DomainError::UnknownReaction(kind.to_string()).into());
        }

        if !self
            .ctx
            .debouncer()
            .settle(post_id, InteractionKind::Reaction)
            .await
        {
            debug!("Superseded by a later click");
            return Ok(InteractionOutcome::Debounced);
        }

        let Some(_guard) =
            InFlightGuard::acquire(self.ctx.store(), post_id, InteractionKind::Reaction)
        else {
            debug!("Reaction already in flight");
            return Ok(InteractionOutcome::Busy);
        };

        let removing = handle.lock().is_reaction_active(kind);
        let target = (!removing).then(|| kind.clone());
        let previous = self.ctx.store().reaction_choice(post_id);

        if !self
            .ctx
            .hooks()
            .before_reaction(post_id, target.as_ref())
            .await
        {
            info!("Reaction vetoed by hook");
            return Ok(InteractionOutcome::Vetoed);
        }

        let update_id = self.ctx.config().ui.optimistic_updates.then(|| {
            self.ctx.ledger().apply_reaction_update(
                post_id,
                &handle,
                kind,
                removing,
                previous.as_ref(),
            )
        });

        match self.ctx.backend().put_reaction(post_id, target.as_ref()).await {
            Ok(()) => {
                self.ctx.store().set_reaction(post_id, target.clone());
                if let Some(update_id) = update_id {
                    self.ctx.ledger().commit(&update_id);
                } else {
                    let mut view = handle.lock();
                    apply_reaction_change(&mut view, kind, removing, previous.as_ref());
                    self.ctx.render(post_id, &view);
                }
                self.ctx
                    .hooks()
                    .after_reaction(post_id, target.as_ref(), true);

                info!(reaction = ?target, "Reaction saved");
                Ok(InteractionOutcome::Committed(target))
            }
            Err(e) => {
                if let Some(update_id) = update_id {
                    self.ctx.ledger().rollback(&update_id);
                }
                self.ctx.report_failure(
                    &e,
                    &HookContext::new(InteractionKind::Reaction, post_id.clone()),
                );
                self.ctx
                    .hooks()
                    .after_reaction(post_id, target.as_ref(), false);
                Ok(InteractionOutcome::RolledBack)
            }
        }
    }
}
