//! User notifications
//!
//! Write failures surface as short-lived messages. The page supplies the
//! actual toast implementation; without one, notifications go to the log.

use std::time::Duration;

use crate::error::ReactionsError;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Error,
    Warning,
    Info,
}

/// Shows transient messages to the viewer
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, level: NotificationLevel, duration: Duration);

    /// Show the user-facing message for an error
    fn show_error(&self, error: &ReactionsError, duration: Duration) {
        self.show(error.user_message(), NotificationLevel::Error, duration);
    }
}

/// Notifier that writes to the `tracing` log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, message: &str, level: NotificationLevel, duration: Duration) {
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        match level {
            NotificationLevel::Error => tracing::error!(duration_ms, "{message}"),
            NotificationLevel::Warning => tracing::warn!(duration_ms, "{message}"),
            NotificationLevel::Info => tracing::info!(duration_ms, "{message}"),
        }
    }
}
