//! A page known up front
//!
//! Stands in for a live document when the posts are already known: the
//! probe binary and tests describe a page by its URL and container ids.

use reactions_core::{PageSource, PostContainer, ScannedPost, UserInfo};

/// Pre-scanned page. Selectors are ignored; `scan_posts` returns the posts
/// added with the builder methods, in order.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    location: String,
    posts: Vec<ScannedPost>,
    viewer: Option<UserInfo>,
}

impl StaticPage {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    /// Add a post whose reactions container has `element_id`
    #[must_use]
    pub fn with_post(mut self, element_id: impl Into<String>) -> Self {
        self.posts
            .push(ScannedPost::with_container(PostContainer::with_id(element_id)));
        self
    }

    /// Add a post whose container carries extra attributes
    #[must_use]
    pub fn with_container(mut self, container: PostContainer) -> Self {
        self.posts.push(ScannedPost::with_container(container));
        self
    }

    /// Add a post without a reactions container
    #[must_use]
    pub fn with_bare_post(mut self) -> Self {
        self.posts.push(ScannedPost::without_container());
        self
    }

    #[must_use]
    pub fn with_viewer(mut self, viewer: UserInfo) -> Self {
        self.viewer = Some(viewer);
        self
    }
}

impl PageSource for StaticPage {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn scan_posts(&self, _post_selector: &str, _container_selector: &str) -> Vec<ScannedPost> {
        self.posts.clone()
    }

    fn current_user(&self) -> Option<UserInfo> {
        self.viewer
    }
}
