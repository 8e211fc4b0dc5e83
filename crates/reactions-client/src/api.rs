//! HTTP client for the reactions service
//!
//! Reads are scoped by `forumUrl` and `topicId` query parameters. Writes go
//! to `/topics/{topic}/posts/{post}/{vote|reaction}` with a bearer token
//! fetched from the authenticator before every attempt.

use std::sync::Arc;

use async_trait::async_trait;
use reactions_common::{ReactionsConfig, ReactionsError, ReactionsResult};
use reactions_core::{PostId, ReactionKind, ReactionRecord, TopicId, VoteChoice, VoteRecord};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::backend::{Authenticator, ReactionsBackend};
use crate::retry::{with_retry, RetryPolicy};

#[derive(Serialize)]
struct VoteBody {
    #[serde(rename = "type")]
    vote_type: Option<VoteChoice>,
}

#[derive(Serialize)]
struct ReactionBody<'a> {
    reaction: Option<&'a ReactionKind>,
}

/// Client bound to one topic on one forum
#[derive(Clone)]
pub struct ReactionsApi {
    http: reqwest::Client,
    server: String,
    origin: String,
    topic_id: TopicId,
    policy: RetryPolicy,
    authenticator: Arc<dyn Authenticator>,
}

impl ReactionsApi {
    pub fn new(
        config: &ReactionsConfig,
        origin: impl Into<String>,
        topic_id: TopicId,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            server: config.server.trim_end_matches('/').to_string(),
            origin: origin.into(),
            topic_id,
            policy: RetryPolicy::from_config(&config.performance),
            authenticator,
        }
    }

    /// Use a preconfigured HTTP client (proxies, timeouts, ...)
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server)
    }

    /// GET `path`. `forumUrl` and `topicId` always override whatever the
    /// caller put in `query`.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> ReactionsResult<reqwest::Response> {
        let url = self.url(path);
        let mut params: Vec<(&str, &str)> = query
            .iter()
            .filter(|(key, _)| *key != "forumUrl" && *key != "topicId")
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        params.push(("forumUrl", &self.origin));
        params.push(("topicId", self.topic_id.as_str()));

        with_retry(&self.policy, |attempt| {
            let request = self
                .http
                .get(&url)
                .query(&params)
                .header(CONTENT_TYPE, "application/json");
            async move {
                debug!(path, attempt, "GET");
                let response = request.send().await.map_err(|e| {
                    ReactionsError::transport(format!("GET {path} failed: {e}"), true)
                })?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ReactionsError::from_status(
                        format!("GET {path} failed: {status}"),
                        status.as_u16(),
                    ));
                }
                Ok(response)
            }
        })
        .await
    }

    /// GET `path` and decode the JSON body. A body that does not decode is
    /// not retried.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ReactionsResult<T> {
        let response = self.get(path, query).await?;
        response.json::<T>().await.map_err(|e| {
            ReactionsError::transport(format!("GET {path} returned an invalid body: {e}"), false)
        })
    }

    /// PUT a JSON body with a fresh bearer token per attempt.
    pub async fn put<B>(&self, path: &str, body: &B) -> ReactionsResult<reqwest::Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);

        with_retry(&self.policy, |attempt| {
            let url = &url;
            async move {
                debug!(path, attempt, "PUT");
                let token = self.authenticator.token().await.map_err(write_failure)?;
                let response = self
                    .http
                    .put(url)
                    .bearer_auth(token)
                    .json(body)
                    .send()
                    .await
                    .map_err(|e| {
                        debug!(path, error = %e, "PUT transport failure");
                        ReactionsError::authentication("Authentication failed")
                    })?;

                let status = response.status();
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    return Err(ReactionsError::authentication("Authentication required"));
                }
                if !status.is_success() {
                    return Err(ReactionsError::from_status(
                        format!("PUT {path} failed: {status}"),
                        status.as_u16(),
                    ));
                }
                Ok(response)
            }
        })
        .await
    }

    fn post_path(&self, post_id: &PostId, leaf: &str) -> String {
        format!("/topics/{}/posts/{post_id}/{leaf}", self.topic_id)
    }
}

/// Write errors are either authentication or network failures
fn write_failure(err: ReactionsError) -> ReactionsError {
    match err {
        ReactionsError::Authentication(_) | ReactionsError::Network { .. } => err,
        ReactionsError::Validation(_) | ReactionsError::Domain(_) => {
            ReactionsError::authentication("Authentication failed")
        }
    }
}

fn post_ids_param(post_ids: &[PostId]) -> String {
    post_ids
        .iter()
        .map(PostId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl ReactionsBackend for ReactionsApi {
    #[instrument(skip(self, post_ids), fields(topic_id = %self.topic_id, posts = post_ids.len()))]
    async fn fetch_votes(&self, post_ids: &[PostId]) -> ReactionsResult<Vec<VoteRecord>> {
        self.get_json("/votes", &[("postIds", post_ids_param(post_ids))])
            .await
    }

    #[instrument(skip(self, post_ids), fields(topic_id = %self.topic_id, posts = post_ids.len()))]
    async fn fetch_reactions(&self, post_ids: &[PostId]) -> ReactionsResult<Vec<ReactionRecord>> {
        self.get_json("/reactions", &[("postIds", post_ids_param(post_ids))])
            .await
    }

    #[instrument(skip(self), fields(topic_id = %self.topic_id))]
    async fn put_vote(&self, post_id: &PostId, vote: Option<VoteChoice>) -> ReactionsResult<()> {
        let path = self.post_path(post_id, "vote");
        self.put(&path, &VoteBody { vote_type: vote }).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(topic_id = %self.topic_id))]
    async fn put_reaction(
        &self,
        post_id: &PostId,
        reaction: Option<&ReactionKind>,
    ) -> ReactionsResult<()> {
        let path = self.post_path(post_id, "reaction");
        self.put(&path, &ReactionBody { reaction }).await?;
        Ok(())
    }
}
