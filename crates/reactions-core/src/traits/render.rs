//! Rendering port

use crate::entities::PostView;
use crate::value_objects::PostId;

/// Projects a post's view model onto the page.
///
/// Called after every change to a post's view, including rollbacks.
pub trait Renderer: Send + Sync {
    fn render(&self, post_id: &PostId, view: &PostView);
}

/// Renderer for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&self, _post_id: &PostId, _view: &PostView) {}
}
