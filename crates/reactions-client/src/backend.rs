//! Ports the features depend on
//!
//! The HTTP client implements [`ReactionsBackend`]; tests run the features
//! against in-memory fakes instead.

use async_trait::async_trait;
use reactions_common::{ReactionsError, ReactionsResult};
use reactions_core::{PostId, ReactionKind, ReactionRecord, VoteChoice, VoteRecord};

/// Remote storage for votes and reactions
#[async_trait]
pub trait ReactionsBackend: Send + Sync {
    /// All vote records for the given posts
    async fn fetch_votes(&self, post_ids: &[PostId]) -> ReactionsResult<Vec<VoteRecord>>;

    /// All reaction records for the given posts
    async fn fetch_reactions(&self, post_ids: &[PostId]) -> ReactionsResult<Vec<ReactionRecord>>;

    /// Set (`Some`) or clear (`None`) the viewer's vote on a post
    async fn put_vote(&self, post_id: &PostId, vote: Option<VoteChoice>) -> ReactionsResult<()>;

    /// Set (`Some`) or clear (`None`) the viewer's reaction on a post
    async fn put_reaction(
        &self,
        post_id: &PostId,
        reaction: Option<&ReactionKind>,
    ) -> ReactionsResult<()>;
}

/// Supplies bearer credentials for writes.
///
/// Called once per write attempt, possibly from several tasks at once.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn token(&self) -> ReactionsResult<String>;
}

/// Authenticator backed by a fixed token
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthenticator {
    token: Option<String>,
}

impl StaticTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// An authenticator that always fails, for anonymous viewers
    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn token(&self) -> ReactionsResult<String> {
        self.token
            .clone()
            .ok_or_else(|| ReactionsError::authentication("Authentication required"))
    }
}
