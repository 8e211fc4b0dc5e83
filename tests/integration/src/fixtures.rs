//! Test fixtures and data generators
//!
//! Provides pages, tokens and seeded records for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use reactions_common::{NotificationLevel, Notifier};
use reactions_core::{ReactionRecord, TopicId, UserInfo, VoteChoice, VoteRecord};
use reactions_service::StaticPage;

/// Forum origin every fixture page lives on
pub const FORUM_ORIGIN: &str = "https://forum.example.com";

/// Counter for unique topics
static COUNTER: AtomicU64 = AtomicU64::new(100);

/// A topic id no other test uses
pub fn unique_topic() -> TopicId {
    TopicId::new(COUNTER.fetch_add(1, Ordering::SeqCst).to_string())
}

pub fn topic_url(topic_id: &TopicId) -> String {
    format!("{FORUM_ORIGIN}/index.php?showtopic={topic_id}")
}

/// Topic page with one `post_<id>` container per post id
pub fn topic_page(topic_id: &TopicId, post_ids: &[&str]) -> StaticPage {
    post_ids
        .iter()
        .fold(StaticPage::new(topic_url(topic_id)), |page, id| {
            page.with_post(format!("post_{id}"))
        })
}

/// Topic page viewed by `user_id`
pub fn topic_page_as(topic_id: &TopicId, post_ids: &[&str], user_id: u64) -> StaticPage {
    topic_page(topic_id, post_ids).with_viewer(UserInfo::new(user_id))
}

/// Bearer token the fake server accepts for `user_id`
pub fn token_for(user_id: u64) -> String {
    format!("user-{user_id}")
}

pub fn vote(topic_id: &TopicId, post_id: &str, user_id: u64, choice: VoteChoice) -> VoteRecord {
    let mut record = VoteRecord::new(post_id, user_id, choice);
    record.forum_url = Some(FORUM_ORIGIN.to_string());
    record.topic_id = Some(topic_id.clone());
    record
}

pub fn reaction(topic_id: &TopicId, post_id: &str, user_id: u64, kind: &str) -> ReactionRecord {
    let mut record = ReactionRecord::new(post_id, user_id, kind);
    record.forum_url = Some(FORUM_ORIGIN.to_string());
    record.topic_id = Some(topic_id.clone());
    record
}

/// Notifier that keeps every message
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, NotificationLevel)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(String, NotificationLevel)> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, level: NotificationLevel, _duration: Duration) {
        self.messages.lock().push((message.to_string(), level));
    }
}
