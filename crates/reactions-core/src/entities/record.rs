//! Records returned by the bulk read endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{PostId, ReactionKind, TopicId, UserId, VoteChoice};

/// One user's vote on one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub user_id: UserId,
    #[serde(default)]
    pub forum_url: Option<String>,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    pub post_id: PostId,
    pub vote_type: VoteChoice,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl VoteRecord {
    /// Minimal record, as used by fixtures and fakes
    pub fn new(post_id: impl Into<PostId>, user_id: impl Into<UserId>, vote_type: VoteChoice) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            forum_url: None,
            topic_id: None,
            post_id: post_id.into(),
            vote_type,
            user_name: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// One user's reaction on one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub user_id: UserId,
    #[serde(default)]
    pub forum_url: Option<String>,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    pub post_id: PostId,
    pub reaction: ReactionKind,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ReactionRecord {
    pub fn new(
        post_id: impl Into<PostId>,
        user_id: impl Into<UserId>,
        reaction: impl Into<ReactionKind>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            forum_url: None,
            topic_id: None,
            post_id: post_id.into(),
            reaction: reaction.into(),
            user_name: None,
            created_at: None,
            updated_at: None,
        }
    }
}
