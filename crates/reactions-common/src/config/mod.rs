//! Configuration structs

mod reactions_config;

pub use reactions_config::{
    BackoffMode, ConfigError, CustomizationConfig, PerformanceConfig, ReactionIcon,
    ReactionsConfig, SelectorConfig, UiConfig, VoteLabels,
};
