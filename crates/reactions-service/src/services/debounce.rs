//! Trailing-edge debounce per `(post, kind)`
//!
//! Every click takes a fresh ticket and waits out the debounce interval.
//! Only the click whose ticket is still the latest for its key afterwards
//! goes on; the earlier ones in the window are dropped. The winner clears
//! its entry so the map only holds keys with a click in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use reactions_core::{InteractionKind, PostId};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    next_ticket: AtomicU64,
    latest: DashMap<(PostId, InteractionKind), u64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_ticket: AtomicU64::new(0),
            latest: DashMap::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of keys with a click still waiting
    pub fn pending_keys(&self) -> usize {
        self.latest.len()
    }

    /// Wait out the interval. Returns `true` if no later click arrived for
    /// the same `(post, kind)` in the meantime.
    pub async fn settle(&self, post_id: &PostId, kind: InteractionKind) -> bool {
        if self.delay.is_zero() {
            return true;
        }

        let key = (post_id.clone(), kind);
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        self.latest.insert(key.clone(), ticket);

        tokio::time::sleep(self.delay).await;
        self.latest
            .remove_if(&key, |_, latest| *latest == ticket)
            .is_some()
    }
}
