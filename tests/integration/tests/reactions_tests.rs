//! End-to-end tests of the widget against the fake reactions server
//!
//! Run with: cargo test -p integration-tests --test reactions_tests

use std::sync::Arc;

use integration_tests::{
    assert_json, assert_status, fixtures::*, Endpoint, TestServer,
};
use reactions_client::StaticTokenAuthenticator;
use reactions_common::NotificationLevel;
use reactions_core::{ButtonState, PostId, ReactionKind, VoteChoice, VoteRecord};
use reactions_service::{InteractionOutcome, LoadStatus, ReactionsPage};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Fake server contract
// ============================================================================

#[tokio::test]
async fn test_fake_server_round_trip() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    let path = format!("/topics/{topic}/posts/5/vote");

    let response = server
        .put_auth(&path, &token_for(3), &json!({ "type": "dislike" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(
            "/votes",
            &[("topicId", topic.as_str()), ("forumUrl", FORUM_ORIGIN), ("postIds", "5")],
        )
        .await
        .unwrap();
    let records: Vec<VoteRecord> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vote_type, VoteChoice::Dislike);
    assert!(records[0].created_at.is_some());
}

#[tokio::test]
async fn test_fake_server_rejects_missing_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .put_auth("/topics/1/posts/5/vote", "nobody", &json!({ "type": "like" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Initialization
// ============================================================================

#[tokio::test]
async fn test_initialize_loads_existing_data() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    server.state.seed_votes([
        vote(&topic, "5", 1, VoteChoice::Like),
        vote(&topic, "5", 2, VoteChoice::Like),
        vote(&topic, "6", 1, VoteChoice::Dislike),
        vote(&unique_topic(), "5", 9, VoteChoice::Like),
    ]);
    server.state.seed_reactions([
        reaction(&topic, "5", 1, "heart"),
        reaction(&topic, "5", 2, "heart"),
        reaction(&topic, "5", 3, "clap"),
    ]);

    let page = ReactionsPage::initialize(server.config(), &topic_page_as(&topic, &["5", "6"], 1))
        .await
        .unwrap()
        .expect("topic page");

    let summary = page.load_summary();
    assert_eq!(summary.posts, 2);
    assert_eq!(summary.votes, LoadStatus::Loaded(3));
    assert_eq!(summary.reactions, LoadStatus::Loaded(3));

    let five = page.post(&PostId::new("5")).unwrap();
    assert_eq!(five.upvote, Some(ButtonState::new(true, 2)));
    assert_eq!(
        five.option(&ReactionKind::new("heart")).unwrap().state,
        ButtonState::new(true, 2)
    );
    assert_eq!(
        five.option(&ReactionKind::new("clap")).unwrap().state,
        ButtonState::new(false, 1)
    );
    let six = page.post(&PostId::new("6")).unwrap();
    assert_eq!(six.downvote, Some(ButtonState::new(true, 1)));

    let reads = server.state.requests_to(Endpoint::Votes);
    assert_eq!(reads.len(), 1);
    assert_eq!(reads[0].query["forumUrl"], FORUM_ORIGIN);
    assert_eq!(reads[0].query["topicId"], topic.as_str());
    assert_eq!(reads[0].query["postIds"], "5,6");
}

#[tokio::test]
async fn test_non_topic_page_makes_no_requests() {
    let server = TestServer::start().await.expect("Failed to start server");
    let page = reactions_service::StaticPage::new(format!("{FORUM_ORIGIN}/index.php?showforum=2"))
        .with_post("post_5");

    let result = ReactionsPage::initialize(server.config(), &page).await.unwrap();

    assert!(result.is_none());
    assert!(server.state.requests().is_empty());
}

#[tokio::test]
async fn test_read_failure_of_one_kind_is_isolated() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    server.state.seed_reactions([reaction(&topic, "5", 1, "heart")]);
    server.state.fail_with(Endpoint::Votes, [404]);

    let page = ReactionsPage::initialize(server.config(), &topic_page(&topic, &["5"]))
        .await
        .unwrap()
        .expect("topic page");

    assert_eq!(page.load_summary().votes, LoadStatus::Failed);
    assert_eq!(page.load_summary().reactions, LoadStatus::Loaded(1));
    // 404 is not retried
    assert_eq!(server.state.requests_to(Endpoint::Votes).len(), 1);
}

#[tokio::test]
async fn test_reads_retry_server_errors() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    server.state.seed_votes([vote(&topic, "5", 1, VoteChoice::Like)]);
    server.state.fail_with(Endpoint::Votes, [500, 503]);

    let page = ReactionsPage::initialize(server.config(), &topic_page(&topic, &["5"]))
        .await
        .unwrap()
        .expect("topic page");

    assert_eq!(page.load_summary().votes, LoadStatus::Loaded(1));
    assert_eq!(server.state.requests_to(Endpoint::Votes).len(), 3);
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_vote_persists_and_reloads() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    server.state.seed_votes([vote(&topic, "5", 2, VoteChoice::Dislike)]);
    let page = ReactionsPage::builder(server.config())
        .authenticator(Arc::new(StaticTokenAuthenticator::new(token_for(2))))
        .initialize(&topic_page_as(&topic, &["5"], 2))
        .await
        .unwrap()
        .expect("topic page");

    let outcome = page
        .votes()
        .click(&PostId::new("5"), VoteChoice::Like)
        .await
        .unwrap();

    assert_eq!(outcome, InteractionOutcome::Committed(Some(VoteChoice::Like)));
    let view = page.post(&PostId::new("5")).unwrap();
    assert_eq!(view.upvote, Some(ButtonState::new(true, 1)));
    assert_eq!(view.downvote, Some(ButtonState::new(false, 0)));

    let writes = server.state.requests_to(Endpoint::PutVote);
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, format!("/topics/{topic}/posts/5/vote"));
    assert_eq!(writes[0].authorization.as_deref(), Some("Bearer user-2"));
    assert_eq!(writes[0].body, Some(json!({ "type": "like" })));

    // A fresh page sees the stored vote
    let reloaded = ReactionsPage::initialize(server.config(), &topic_page_as(&topic, &["5"], 2))
        .await
        .unwrap()
        .expect("topic page");
    let view = reloaded.post(&PostId::new("5")).unwrap();
    assert_eq!(view.upvote, Some(ButtonState::new(true, 1)));
    assert_eq!(view.downvote, Some(ButtonState::new(false, 0)));
}

#[tokio::test]
async fn test_reaction_switch_and_clear() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    server.state.seed_reactions([
        reaction(&topic, "5", 1, "heart"),
        reaction(&topic, "5", 4, "heart"),
    ]);
    let page = ReactionsPage::builder(server.config())
        .authenticator(Arc::new(StaticTokenAuthenticator::new(token_for(1))))
        .initialize(&topic_page_as(&topic, &["5"], 1))
        .await
        .unwrap()
        .expect("topic page");
    let post = PostId::new("5");
    let heart = ReactionKind::new("heart");
    let clap = ReactionKind::new("clap");

    let outcome = page.reactions().click(&post, &clap).await.unwrap();
    assert_eq!(outcome, InteractionOutcome::Committed(Some(clap.clone())));
    let view = page.post(&post).unwrap();
    assert_eq!(view.option(&heart).unwrap().state, ButtonState::new(false, 1));
    assert_eq!(view.option(&clap).unwrap().state, ButtonState::new(true, 1));

    let outcome = page.reactions().click(&post, &clap).await.unwrap();
    assert_eq!(outcome, InteractionOutcome::Committed(None));
    assert_eq!(page.post(&post).unwrap().active_reaction(), None);

    let stored = server.state.reactions();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].reaction, heart);
    assert_eq!(
        server.state.requests_to(Endpoint::PutReaction)[1].body,
        Some(json!({ "reaction": null }))
    );
}

#[tokio::test]
async fn test_anonymous_write_rolls_back_and_notifies() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    server.state.seed_votes([vote(&topic, "5", 8, VoteChoice::Like)]);
    let notifier = Arc::new(RecordingNotifier::default());
    let page = ReactionsPage::builder(server.config())
        .notifier(notifier.clone())
        .initialize(&topic_page(&topic, &["5"]))
        .await
        .unwrap()
        .expect("topic page");
    let before = page.post(&PostId::new("5")).unwrap();

    let outcome = page
        .votes()
        .click(&PostId::new("5"), VoteChoice::Like)
        .await
        .unwrap();

    assert_eq!(outcome, InteractionOutcome::RolledBack);
    assert_eq!(page.post(&PostId::new("5")).unwrap(), before);
    assert_eq!(
        notifier.messages(),
        vec![(
            "Please log in to vote or react to posts".to_string(),
            NotificationLevel::Error
        )]
    );
    // No token, so nothing reached the server
    assert!(server.state.requests_to(Endpoint::PutVote).is_empty());
}

#[tokio::test]
async fn test_rejected_token_is_not_retried() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    let page = ReactionsPage::builder(server.config())
        .authenticator(Arc::new(StaticTokenAuthenticator::new("expired")))
        .initialize(&topic_page(&topic, &["5"]))
        .await
        .unwrap()
        .expect("topic page");

    let outcome = page
        .reactions()
        .click(&PostId::new("5"), &ReactionKind::new("heart"))
        .await
        .unwrap();

    assert_eq!(outcome, InteractionOutcome::RolledBack);
    assert_eq!(server.state.requests_to(Endpoint::PutReaction).len(), 1);
    assert!(server.state.reactions().is_empty());
}

#[tokio::test]
async fn test_write_retries_transient_failures() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    server.state.fail_with(Endpoint::PutVote, [503, 429]);
    let page = ReactionsPage::builder(server.config())
        .authenticator(Arc::new(StaticTokenAuthenticator::new(token_for(5))))
        .initialize(&topic_page(&topic, &["5"]))
        .await
        .unwrap()
        .expect("topic page");

    let outcome = page
        .votes()
        .click(&PostId::new("5"), VoteChoice::Dislike)
        .await
        .unwrap();

    assert!(outcome.is_committed());
    assert_eq!(server.state.requests_to(Endpoint::PutVote).len(), 3);
    assert_eq!(server.state.votes().len(), 1);
}

#[tokio::test]
async fn test_write_gives_up_after_max_retries() {
    let server = TestServer::start().await.expect("Failed to start server");
    let topic = unique_topic();
    server.state.fail_with(Endpoint::PutVote, [500, 500, 500, 500]);
    let notifier = Arc::new(RecordingNotifier::default());
    let page = ReactionsPage::builder(server.config())
        .authenticator(Arc::new(StaticTokenAuthenticator::new(token_for(5))))
        .notifier(notifier.clone())
        .initialize(&topic_page(&topic, &["5"]))
        .await
        .unwrap()
        .expect("topic page");

    let outcome = page
        .votes()
        .click(&PostId::new("5"), VoteChoice::Like)
        .await
        .unwrap();

    assert_eq!(outcome, InteractionOutcome::RolledBack);
    assert_eq!(server.state.requests_to(Endpoint::PutVote).len(), 3);
    assert_eq!(
        notifier.messages()[0].0,
        "Network error. Please check your connection."
    );
    assert_eq!(page.ledger().pending_count(), 0);
}
