//! Feature context - dependency container for the features
//!
//! Holds the per-page shared state and the injected collaborators.

use std::sync::Arc;

use reactions_client::ReactionsBackend;
use reactions_common::{Notifier, ReactionsConfig, ReactionsError, TracingNotifier};
use reactions_core::{NoopRenderer, PostId, PostView, Renderer};
use tracing::error;

use super::debounce::Debouncer;
use super::hooks::{HookContext, InteractionHooks, NoHooks};
use super::reaction::ReactionService;
use super::vote::VoteService;
use crate::optimistic::OptimisticLedger;
use crate::state::{InteractionStateStore, PostRegistry};

/// Everything the vote and reaction features need
#[derive(Clone)]
pub struct FeatureContext {
    config: Arc<ReactionsConfig>,
    backend: Arc<dyn ReactionsBackend>,

    // Per-page state
    registry: Arc<PostRegistry>,
    store: Arc<InteractionStateStore>,
    ledger: Arc<OptimisticLedger>,
    debouncer: Arc<Debouncer>,

    // Collaborators
    renderer: Arc<dyn Renderer>,
    notifier: Arc<dyn Notifier>,
    hooks: Arc<dyn InteractionHooks>,
}

impl FeatureContext {
    /// Context with headless defaults: no rendering, notifications to the
    /// log, no hooks.
    pub fn new(config: ReactionsConfig, backend: Arc<dyn ReactionsBackend>) -> Self {
        let renderer: Arc<dyn Renderer> = Arc::new(NoopRenderer);
        let debouncer = Debouncer::new(config.performance.debounce());
        Self {
            config: Arc::new(config),
            backend,
            registry: Arc::new(PostRegistry::new()),
            store: Arc::new(InteractionStateStore::new()),
            ledger: Arc::new(OptimisticLedger::new(renderer.clone())),
            debouncer: Arc::new(debouncer),
            renderer,
            notifier: Arc::new(TracingNotifier),
            hooks: Arc::new(NoHooks),
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.ledger = Arc::new(OptimisticLedger::new(renderer.clone()));
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn InteractionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    // === Accessors ===

    pub fn config(&self) -> &ReactionsConfig {
        &self.config
    }

    pub fn backend(&self) -> &Arc<dyn ReactionsBackend> {
        &self.backend
    }

    pub fn registry(&self) -> &Arc<PostRegistry> {
        &self.registry
    }

    pub fn store(&self) -> &Arc<InteractionStateStore> {
        &self.store
    }

    pub fn ledger(&self) -> &Arc<OptimisticLedger> {
        &self.ledger
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn hooks(&self) -> &Arc<dyn InteractionHooks> {
        &self.hooks
    }

    // === Features ===

    pub fn votes(&self) -> VoteService<'_> {
        VoteService::new(self)
    }

    pub fn reactions(&self) -> ReactionService<'_> {
        ReactionService::new(self)
    }

    // === Helpers ===

    pub fn render(&self, post_id: &PostId, view: &PostView) {
        self.renderer.render(post_id, view);
    }

    /// Notify (if configured), run the error hook, and log
    pub(crate) fn report_failure(&self, err: &ReactionsError, context: &HookContext) {
        if self.config.ui.show_error_notifications {
            self.notifier
                .show_error(err, self.config.ui.notification_duration());
        }
        self.hooks.on_error(err, context);
        error!(
            kind = %context.kind,
            post_id = %context.post_id,
            code = err.error_code(),
            error = %err,
            "Interaction failed"
        );
    }
}
