//! Registered posts and their view models

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use reactions_core::{PostId, PostView};

/// Shared, lockable view model of one post
pub type PostHandle = Arc<Mutex<PostView>>;

#[derive(Default)]
struct Inner {
    order: Vec<PostId>,
    posts: HashMap<PostId, PostHandle>,
}

/// Posts found on the page, in discovery order.
///
/// Registering an id twice replaces the earlier view but keeps its position.
#[derive(Default)]
pub struct PostRegistry {
    inner: RwLock<Inner>,
}

impl PostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, post_id: PostId, view: PostView) -> PostHandle {
        let handle: PostHandle = Arc::new(Mutex::new(view));
        let mut inner = self.inner.write();
        if inner.posts.insert(post_id.clone(), handle.clone()).is_some() {
            tracing::debug!(post_id = %post_id, "Duplicate post id, replacing earlier post");
        } else {
            inner.order.push(post_id);
        }
        handle
    }

    pub fn get(&self, post_id: &PostId) -> Option<PostHandle> {
        self.inner.read().posts.get(post_id).cloned()
    }

    pub fn contains(&self, post_id: &PostId) -> bool {
        self.inner.read().posts.contains_key(post_id)
    }

    pub fn post_ids(&self) -> Vec<PostId> {
        self.inner.read().order.clone()
    }

    /// Snapshot of `(id, handle)` pairs in discovery order
    pub fn entries(&self) -> Vec<(PostId, PostHandle)> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.posts.get(id).map(|handle| (id.clone(), handle.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
