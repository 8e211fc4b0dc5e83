//! Fake reactions service
//!
//! Implements the read and write endpoints over in-memory records. Bearer
//! tokens of the form `user-<id>` authenticate as that user. Failures can be
//! queued per endpoint to exercise retries.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::Utc;
use parking_lot::Mutex;
use reactions_core::{PostId, ReactionKind, ReactionRecord, TopicId, UserId, VoteChoice, VoteRecord};
use serde_json::Value;

/// Endpoints of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Votes,
    Reactions,
    PutVote,
    PutReaction,
}

/// A request as the fake server saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub endpoint: Endpoint,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct ServerState {
    votes: Mutex<Vec<VoteRecord>>,
    reactions: Mutex<Vec<ReactionRecord>>,
    failures: Mutex<HashMap<Endpoint, VecDeque<u16>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    next_id: AtomicU64,
}

pub type SharedState = Arc<ServerState>;

impl ServerState {
    pub fn seed_votes(&self, records: impl IntoIterator<Item = VoteRecord>) {
        self.votes.lock().extend(records);
    }

    pub fn seed_reactions(&self, records: impl IntoIterator<Item = ReactionRecord>) {
        self.reactions.lock().extend(records);
    }

    /// Answer the next requests to `endpoint` with these statuses, in order
    pub fn fail_with(&self, endpoint: Endpoint, statuses: impl IntoIterator<Item = u16>) {
        self.failures
            .lock()
            .entry(endpoint)
            .or_default()
            .extend(statuses);
    }

    pub fn votes(&self) -> Vec<VoteRecord> {
        self.votes.lock().clone()
    }

    pub fn reactions(&self) -> Vec<ReactionRecord> {
        self.reactions.lock().clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, endpoint: Endpoint) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .cloned()
            .collect()
    }

    fn take_failure(&self, endpoint: Endpoint) -> Option<StatusCode> {
        let status = self.failures.lock().get_mut(&endpoint)?.pop_front()?;
        StatusCode::from_u16(status).ok()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests.lock().push(request);
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Build the fake service router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/votes", get(list_votes))
        .route("/reactions", get(list_reactions))
        .route("/topics/:topic_id/posts/:post_id/vote", put(put_vote))
        .route("/topics/:topic_id/posts/:post_id/reaction", put(put_reaction))
        .with_state(state)
}

/// Whether a stored record belongs to the scope of a read
fn in_scope(
    query: &HashMap<String, String>,
    forum_url: Option<&String>,
    topic_id: Option<&TopicId>,
    post_id: &PostId,
) -> bool {
    let post_ids: Vec<&str> = query
        .get("postIds")
        .map(|ids| ids.split(',').collect())
        .unwrap_or_default();
    let forum_matches = forum_url.map_or(true, |url| query.get("forumUrl") == Some(url));
    let topic_matches =
        topic_id.map_or(true, |topic| query.get("topicId").map(String::as_str) == Some(topic.as_str()));
    forum_matches && topic_matches && post_ids.contains(&post_id.as_str())
}

async fn list_votes(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record(RecordedRequest {
        endpoint: Endpoint::Votes,
        path: "/votes".to_string(),
        query: query.clone(),
        authorization: None,
        body: None,
    });
    if let Some(status) = state.take_failure(Endpoint::Votes) {
        return status.into_response();
    }

    let records: Vec<VoteRecord> = state
        .votes
        .lock()
        .iter()
        .filter(|r| in_scope(&query, r.forum_url.as_ref(), r.topic_id.as_ref(), &r.post_id))
        .cloned()
        .collect();
    Json(records).into_response()
}

async fn list_reactions(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record(RecordedRequest {
        endpoint: Endpoint::Reactions,
        path: "/reactions".to_string(),
        query: query.clone(),
        authorization: None,
        body: None,
    });
    if let Some(status) = state.take_failure(Endpoint::Reactions) {
        return status.into_response();
    }

    let records: Vec<ReactionRecord> = state
        .reactions
        .lock()
        .iter()
        .filter(|r| in_scope(&query, r.forum_url.as_ref(), r.topic_id.as_ref(), &r.post_id))
        .cloned()
        .collect();
    Json(records).into_response()
}

/// `Bearer user-<id>` authenticates as `<id>`
fn authenticated_user(authorization: Option<&str>) -> Option<UserId> {
    authorization?
        .strip_prefix("Bearer user-")?
        .parse::<u64>()
        .ok()
        .map(UserId::new)
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn put_vote(
    State(state): State<SharedState>,
    Path((topic_id, post_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = authorization(&headers);
    state.record(RecordedRequest {
        endpoint: Endpoint::PutVote,
        path: format!("/topics/{topic_id}/posts/{post_id}/vote"),
        query: HashMap::new(),
        authorization: authorization.clone(),
        body: Some(body.clone()),
    });
    if let Some(status) = state.take_failure(Endpoint::PutVote) {
        return status.into_response();
    }
    let Some(user_id) = authenticated_user(authorization.as_deref()) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let Ok(vote) = serde_json::from_value::<Option<VoteChoice>>(body["type"].clone()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let topic_id = TopicId::new(topic_id);
    let post_id = PostId::new(post_id);
    let mut votes = state.votes.lock();
    votes.retain(|r| {
        !(r.user_id == user_id && r.post_id == post_id && r.topic_id.as_ref() == Some(&topic_id))
    });
    if let Some(vote_type) = vote {
        let mut record = VoteRecord::new(post_id, user_id, vote_type);
        record.id = Some(state.next_id());
        record.topic_id = Some(topic_id);
        record.created_at = Some(Utc::now());
        votes.push(record);
    }

    Json(serde_json::json!({ "success": true })).into_response()
}

async fn put_reaction(
    State(state): State<SharedState>,
    Path((topic_id, post_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = authorization(&headers);
    state.record(RecordedRequest {
        endpoint: Endpoint::PutReaction,
        path: format!("/topics/{topic_id}/posts/{post_id}/reaction"),
        query: HashMap::new(),
        authorization: authorization.clone(),
        body: Some(body.clone()),
    });
    if let Some(status) = state.take_failure(Endpoint::PutReaction) {
        return status.into_response();
    }
    let Some(user_id) = authenticated_user(authorization.as_deref()) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let Ok(reaction) = serde_json::from_value::<Option<ReactionKind>>(body["reaction"].clone()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let topic_id = TopicId::new(topic_id);
    let post_id = PostId::new(post_id);
    let mut reactions = state.reactions.lock();
    reactions.retain(|r| {
        !(r.user_id == user_id && r.post_id == post_id && r.topic_id.as_ref() == Some(&topic_id))
    });
    if let Some(kind) = reaction {
        let mut record = ReactionRecord::new(post_id, user_id, kind);
        record.id = Some(state.next_id());
        record.topic_id = Some(topic_id);
        record.created_at = Some(Utc::now());
        reactions.push(record);
    }

    Json(serde_json::json!({ "success": true })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_user() {
        assert_eq!(authenticated_user(Some("Bearer user-7")), Some(UserId::new(7)));
        assert_eq!(authenticated_user(Some("Bearer admin")), None);
        assert_eq!(authenticated_user(None), None);
    }
}
