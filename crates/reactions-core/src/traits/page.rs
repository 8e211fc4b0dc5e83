//! Page access
//!
//! Selector evaluation and element creation belong to the hosting page. The
//! core only sees the results of a scan: which posts exist, and for each
//! one whether a reactions container was found.

use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::UserInfo;
use crate::value_objects::PostId;

/// The element a post's vote and reaction controls are attached to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostContainer {
    /// The container's element id attribute (may be empty)
    pub element_id: String,
    /// Any other attributes the page adapter chose to expose
    pub attributes: HashMap<String, String>,
}

impl PostContainer {
    pub fn with_id(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// One element matched by the post selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedPost {
    /// `None` when the reactions-container selector matched nothing inside the post
    pub container: Option<PostContainer>,
}

impl ScannedPost {
    pub fn with_container(container: PostContainer) -> Self {
        Self {
            container: Some(container),
        }
    }

    pub fn without_container() -> Self {
        Self { container: None }
    }
}

/// Derives a post id from its reactions container
pub type PostIdFn = Arc<dyn Fn(&PostContainer) -> PostId + Send + Sync>;

/// Default post id derivation: the part after the first `_` of the
/// container's element id (`"post_123"` becomes `"123"`), or empty.
pub fn default_post_id(container: &PostContainer) -> PostId {
    PostId::new(container.element_id.split('_').nth(1).unwrap_or_default())
}

/// The hosting page
pub trait PageSource: Send + Sync {
    /// Full URL of the current page
    fn location(&self) -> String;

    /// Evaluate the post selector and, within each match, the container selector
    fn scan_posts(&self, post_selector: &str, container_selector: &str) -> Vec<ScannedPost>;

    /// The logged-in viewer, if any
    fn current_user(&self) -> Option<UserInfo>;
}
