//! # reactions-common
//!
//! Shared utilities including configuration, error handling, user
//! notifications, and telemetry.

pub mod config;
pub mod error;
pub mod notify;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    BackoffMode, ConfigError, CustomizationConfig, PerformanceConfig, ReactionIcon,
    ReactionsConfig, SelectorConfig, UiConfig, VoteLabels,
};
pub use error::{ReactionsError, ReactionsResult};
pub use notify::{NotificationLevel, Notifier, TracingNotifier};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
