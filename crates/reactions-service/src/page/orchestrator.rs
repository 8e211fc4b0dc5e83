//! Page orchestrator
//!
//! Entry point of the widget. Resolves the topic from the page URL,
//! registers every post that has a reactions container, then loads votes
//! and reactions concurrently. Either load may fail without affecting the
//! other or the already-registered posts.

use std::sync::Arc;

use reactions_client::{
    Authenticator, PageLocation, ReactionsApi, ReactionsBackend, StaticTokenAuthenticator,
};
use reactions_common::{Notifier, ReactionsConfig, ReactionsResult};
use reactions_core::{
    default_post_id, PageSource, PostId, PostIdFn, PostView, Renderer, TopicId, UserInfo,
};
use tracing::{debug, info, instrument, warn};

use super::reconcile::{apply_reactions, apply_votes};
use crate::optimistic::OptimisticLedger;
use crate::services::{FeatureContext, InteractionHooks, ReactionService, VoteService};
use crate::state::{InteractionStateStore, PostRegistry};

/// How one bulk load went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The feature is disabled or there were no posts
    Skipped,
    /// Loaded this many records
    Loaded(usize),
    Failed,
}

impl LoadStatus {
    pub fn is_loaded(self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// What `initialize` found and loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub posts: usize,
    pub votes: LoadStatus,
    pub reactions: LoadStatus,
}

/// Collects collaborators before the page is scanned
pub struct ReactionsPageBuilder {
    config: ReactionsConfig,
    backend: Option<Arc<dyn ReactionsBackend>>,
    authenticator: Arc<dyn Authenticator>,
    renderer: Option<Arc<dyn Renderer>>,
    notifier: Option<Arc<dyn Notifier>>,
    hooks: Option<Arc<dyn InteractionHooks>>,
    post_id_fn: PostIdFn,
}

impl ReactionsPageBuilder {
    pub fn new(config: ReactionsConfig) -> Self {
        Self {
            config,
            backend: None,
            authenticator: Arc::new(StaticTokenAuthenticator::anonymous()),
            renderer: None,
            notifier: None,
            hooks: None,
            post_id_fn: Arc::new(default_post_id),
        }
    }

    /// Talk to this backend instead of the HTTP client for `config.server`
    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn ReactionsBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    #[must_use]
    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn hooks(mut self, hooks: Arc<dyn InteractionHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Derive post ids from containers with `f` instead of the default
    #[must_use]
    pub fn post_id_fn(mut self, f: PostIdFn) -> Self {
        self.post_id_fn = f;
        self
    }

    /// Validate the configuration, scan `page`, and load existing data.
    ///
    /// Returns `Ok(None)` when the page is not a topic page. An invalid
    /// configuration is an error and nothing is registered.
    #[instrument(skip_all)]
    pub async fn initialize(self, page: &dyn PageSource) -> ReactionsResult<Option<ReactionsPage>> {
        self.config.validate()?;

        let location = PageLocation::parse(&page.location())?;
        let Some(topic_id) = location.topic_id() else {
            debug!(url = %location.as_str(), "Not a topic page");
            return Ok(None);
        };
        let viewer = page.current_user();

        let backend: Arc<dyn ReactionsBackend> = match self.backend {
            Some(backend) => backend,
            None => Arc::new(ReactionsApi::new(
                &self.config,
                location.origin(),
                topic_id.clone(),
                self.authenticator.clone(),
            )),
        };

        let mut context = FeatureContext::new(self.config, backend);
        if let Some(renderer) = self.renderer {
            context = context.with_renderer(renderer);
        }
        if let Some(notifier) = self.notifier {
            context = context.with_notifier(notifier);
        }
        if let Some(hooks) = self.hooks {
            context = context.with_hooks(hooks);
        }

        register_posts(&context, page, &self.post_id_fn);

        let mut reactions_page = ReactionsPage {
            context,
            topic_id,
            viewer,
            summary: LoadSummary {
                posts: 0,
                votes: LoadStatus::Skipped,
                reactions: LoadStatus::Skipped,
            },
        };
        reactions_page.summary = reactions_page.refresh().await;

        info!(
            topic_id = %reactions_page.topic_id,
            posts = reactions_page.summary.posts,
            votes = ?reactions_page.summary.votes,
            reactions = ?reactions_page.summary.reactions,
            "Reactions initialized"
        );
        Ok(Some(reactions_page))
    }
}

fn register_posts(context: &FeatureContext, page: &dyn PageSource, post_id_fn: &PostIdFn) {
    let config = context.config();
    let selectors = &config.selectors;

    for post in page.scan_posts(&selectors.post, &selectors.reactions_container) {
        let Some(container) = post.container else {
            debug!("Post without reactions container, skipping");
            continue;
        };

        let post_id = post_id_fn(&container);
        let icons: Vec<_> = if config.reactions {
            config.customization.icon_pairs().collect()
        } else {
            Vec::new()
        };
        let view = PostView::new(config.votes, icons);

        context.render(&post_id, &view);
        context.registry().register(post_id, view);
    }
}

/// A scanned topic page with its features wired up
pub struct ReactionsPage {
    context: FeatureContext,
    topic_id: TopicId,
    viewer: Option<UserInfo>,
    summary: LoadSummary,
}

impl ReactionsPage {
    pub fn builder(config: ReactionsConfig) -> ReactionsPageBuilder {
        ReactionsPageBuilder::new(config)
    }

    /// Initialize with default collaborators and an anonymous viewer token
    pub async fn initialize(
        config: ReactionsConfig,
        page: &dyn PageSource,
    ) -> ReactionsResult<Option<Self>> {
        Self::builder(config).initialize(page).await
    }

    /// Reload votes and reactions for every registered post
    pub async fn refresh(&self) -> LoadSummary {
        let ctx = &self.context;
        let post_ids = ctx.registry().post_ids();
        let viewer = self.viewer.map(|user| user.user_id);

        if post_ids.is_empty() {
            debug!("No posts registered, skipping loads");
            return LoadSummary {
                posts: 0,
                votes: LoadStatus::Skipped,
                reactions: LoadStatus::Skipped,
            };
        }

        let load_reactions = async {
            if !ctx.config().reactions {
                return LoadStatus::Skipped;
            }
            match ctx.backend().fetch_reactions(&post_ids).await {
                Ok(records) => {
                    apply_reactions(ctx, &records, viewer);
                    LoadStatus::Loaded(records.len())
                }
                Err(e) => {
                    warn!(error = %e, code = e.error_code(), "Failed to load reactions");
                    LoadStatus::Failed
                }
            }
        };

        let load_votes = async {
            if !ctx.config().votes.is_enabled() {
                return LoadStatus::Skipped;
            }
            match ctx.backend().fetch_votes(&post_ids).await {
                Ok(records) => {
                    apply_votes(ctx, &records, viewer);
                    LoadStatus::Loaded(records.len())
                }
                Err(e) => {
                    warn!(error = %e, code = e.error_code(), "Failed to load votes");
                    LoadStatus::Failed
                }
            }
        };

        let (reactions, votes) = tokio::join!(load_reactions, load_votes);

        LoadSummary {
            posts: post_ids.len(),
            votes,
            reactions,
        }
    }

    // === Accessors ===

    pub fn context(&self) -> &FeatureContext {
        &self.context
    }

    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    pub fn viewer(&self) -> Option<UserInfo> {
        self.viewer
    }

    pub fn load_summary(&self) -> LoadSummary {
        self.summary
    }

    pub fn registry(&self) -> &Arc<PostRegistry> {
        self.context.registry()
    }

    pub fn store(&self) -> &Arc<InteractionStateStore> {
        self.context.store()
    }

    pub fn ledger(&self) -> &Arc<OptimisticLedger> {
        self.context.ledger()
    }

    pub fn post(&self, post_id: &PostId) -> Option<PostView> {
        self.registry().get(post_id).map(|handle| handle.lock().clone())
    }

    pub fn votes(&self) -> VoteService<'_> {
        self.context.votes()
    }

    pub fn reactions(&self) -> ReactionService<'_> {
        self.context.reactions()
    }
}
