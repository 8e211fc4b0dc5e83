//! In-flight guard

use reactions_core::{InteractionKind, PostId};

use crate::state::InteractionStateStore;

/// Holds the in-flight latch of one `(post, kind)` and releases it on drop,
/// whether the interaction committed, rolled back, or was cancelled.
pub struct InFlightGuard<'a> {
    store: &'a InteractionStateStore,
    post_id: PostId,
    kind: InteractionKind,
}

impl<'a> InFlightGuard<'a> {
    /// `None` if a write for this `(post, kind)` is already in flight
    pub fn acquire(store: &'a InteractionStateStore, post_id: &PostId, kind: InteractionKind) -> Option<Self> {
        store.try_begin(post_id, kind).then(|| Self {
            store,
            post_id: post_id.clone(),
            kind,
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.store.set_loading(&self.post_id, self.kind, false);
    }
}
