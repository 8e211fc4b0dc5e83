//! Widget configuration
//!
//! Partial configurations (JSON from the page integration, or environment
//! variables) are completed with defaults and then validated once at startup.
//! A configuration that fails validation keeps the widget from activating.

use reactions_core::{ReactionKind, VoteMode};
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main widget configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionsConfig {
    #[serde(default)]
    pub votes: VoteMode,
    #[serde(default = "default_true")]
    pub reactions: bool,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default)]
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub customization: CustomizationConfig,
}

/// Selectors the page adapter evaluates
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorConfig {
    #[serde(default = "default_post_selector")]
    pub post: String,
    #[serde(default = "default_container_selector")]
    pub reactions_container: String,
}

/// Delay growth between retry attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffMode {
    None,
    Linear,
    #[default]
    Exponential,
}

impl FromStr for BackoffMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "linear" => Ok(Self::Linear),
            "exponential" => Ok(Self::Exponential),
            other => Err(ConfigError::InvalidValue(
                "performance.retryBackoff",
                format!("unknown backoff mode '{other}'"),
            )),
        }
    }
}

/// Debounce and retry knobs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default)]
    pub retry_backoff: BackoffMode,
}

impl PerformanceConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Interaction feedback knobs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub optimistic_updates: bool,
    #[serde(default = "default_true")]
    pub show_error_notifications: bool,
    #[serde(default = "default_notification_duration_ms")]
    pub notification_duration_ms: u64,
}

impl UiConfig {
    #[must_use]
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }
}

/// A selectable reaction and how it is displayed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionIcon {
    pub name: ReactionKind,
    pub icon: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl ReactionIcon {
    pub fn new(name: &str, icon: &str, label: &str) -> Self {
        Self {
            name: ReactionKind::from(name),
            icon: icon.to_string(),
            label: Some(label.to_string()),
        }
    }
}

/// Accessible labels for the vote buttons
#[derive(Debug, Clone, Deserialize)]
pub struct VoteLabels {
    #[serde(default = "default_like_label")]
    pub like: String,
    #[serde(default = "default_dislike_label")]
    pub dislike: String,
}

/// Reaction set and labels
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationConfig {
    #[serde(default = "default_reaction_icons")]
    pub reaction_icons: Vec<ReactionIcon>,
    #[serde(default)]
    pub labels: VoteLabels,
}

impl CustomizationConfig {
    /// `(kind, icon)` pairs in display order
    pub fn icon_pairs(&self) -> impl Iterator<Item = (ReactionKind, String)> + '_ {
        self.reaction_icons
            .iter()
            .map(|r| (r.name.clone(), r.icon.clone()))
    }

    pub fn is_known_reaction(&self, kind: &ReactionKind) -> bool {
        self.reaction_icons.iter().any(|r| &r.name == kind)
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_server() -> String {
    "https://jcink-reactions.nicket.dev".to_string()
}

fn default_post_selector() -> String {
    ".post-normal".to_string()
}

fn default_container_selector() -> String {
    "td:has(>.postcolor)".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_notification_duration_ms() -> u64 {
    5000
}

fn default_like_label() -> String {
    "Like this post".to_string()
}

fn default_dislike_label() -> String {
    "Dislike this post".to_string()
}

fn default_reaction_icons() -> Vec<ReactionIcon> {
    vec![
        ReactionIcon::new("heart", "❤️", "Love"),
        ReactionIcon::new("laugh", "😂", "Funny"),
        ReactionIcon::new("clap", "👏", "Applause"),
        ReactionIcon::new("thinking", "🤔", "Thoughtful"),
        ReactionIcon::new("sad", "😢", "Sad"),
        ReactionIcon::new("angry", "😠", "Angry"),
        ReactionIcon::new("confused", "😕", "Confused"),
        ReactionIcon::new("thumbsup", "👍", "Thumbs up"),
        ReactionIcon::new("thumbsdown", "👎", "Thumbs down"),
    ]
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            post: default_post_selector(),
            reactions_container: default_container_selector(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            retry_backoff: BackoffMode::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            optimistic_updates: true,
            show_error_notifications: true,
            notification_duration_ms: default_notification_duration_ms(),
        }
    }
}

impl Default for VoteLabels {
    fn default() -> Self {
        Self {
            like: default_like_label(),
            dislike: default_dislike_label(),
        }
    }
}

impl Default for CustomizationConfig {
    fn default() -> Self {
        Self {
            reaction_icons: default_reaction_icons(),
            labels: VoteLabels::default(),
        }
    }
}

impl Default for ReactionsConfig {
    fn default() -> Self {
        Self {
            votes: VoteMode::default(),
            reactions: true,
            selectors: SelectorConfig::default(),
            server: default_server(),
            performance: PerformanceConfig::default(),
            ui: UiConfig::default(),
            customization: CustomizationConfig::default(),
        }
    }
}

impl ReactionsConfig {
    /// Merge a partial JSON configuration over the defaults and validate it
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the result fails validation
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `REACTIONS_*` environment variables
    ///
    /// # Errors
    /// Returns an error if a variable holds an unparseable value or the result
    /// fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            votes: parse_var(&lookup, "REACTIONS_VOTES")?.unwrap_or(defaults.votes),
            reactions: parse_var(&lookup, "REACTIONS_ENABLED")?.unwrap_or(defaults.reactions),
            selectors: SelectorConfig {
                post: lookup("REACTIONS_POST_SELECTOR").unwrap_or(defaults.selectors.post),
                reactions_container: lookup("REACTIONS_CONTAINER_SELECTOR")
                    .unwrap_or(defaults.selectors.reactions_container),
            },
            server: lookup("REACTIONS_SERVER").unwrap_or(defaults.server),
            performance: PerformanceConfig {
                debounce_ms: parse_var(&lookup, "REACTIONS_DEBOUNCE_MS")?
                    .unwrap_or(defaults.performance.debounce_ms),
                max_retries: parse_var(&lookup, "REACTIONS_MAX_RETRIES")?
                    .unwrap_or(defaults.performance.max_retries),
                retry_delay_ms: parse_var(&lookup, "REACTIONS_RETRY_DELAY_MS")?
                    .unwrap_or(defaults.performance.retry_delay_ms),
                retry_backoff: parse_var(&lookup, "REACTIONS_RETRY_BACKOFF")?
                    .unwrap_or(defaults.performance.retry_backoff),
            },
            ui: UiConfig {
                optimistic_updates: parse_var(&lookup, "REACTIONS_OPTIMISTIC_UPDATES")?
                    .unwrap_or(defaults.ui.optimistic_updates),
                show_error_notifications: parse_var(&lookup, "REACTIONS_SHOW_ERROR_NOTIFICATIONS")?
                    .unwrap_or(defaults.ui.show_error_notifications),
                notification_duration_ms: parse_var(&lookup, "REACTIONS_NOTIFICATION_DURATION_MS")?
                    .unwrap_or(defaults.ui.notification_duration_ms),
            },
            customization: CustomizationConfig {
                reaction_icons: lookup("REACTIONS_ICONS")
                    .map(|s| parse_icons(&s))
                    .unwrap_or(defaults.customization.reaction_icons),
                labels: defaults.customization.labels,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the startup invariants
    ///
    /// # Errors
    /// Returns the first violated invariant
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "server",
                "server URL is required".to_string(),
            ));
        }
        reqwest::Url::parse(&self.server).map_err(|e| {
            ConfigError::InvalidValue("server", format!("server URL must be a valid URL: {e}"))
        })?;

        if self.selectors.post.trim().is_empty()
            || self.selectors.reactions_container.trim().is_empty()
        {
            return Err(ConfigError::InvalidValue(
                "selectors",
                "post and reactions container selectors are required".to_string(),
            ));
        }

        if self.performance.max_retries < 1 {
            return Err(ConfigError::InvalidValue(
                "performance.maxRetries",
                "max retries must be at least 1".to_string(),
            ));
        }

        if self.reactions && self.customization.reaction_icons.is_empty() {
            return Err(ConfigError::InvalidValue(
                "customization.reactionIcons",
                "at least one reaction icon must be defined when reactions are enabled"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

/// Parse an optional variable, rejecting values that are present but malformed
fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidValue(key, format!("'{raw}': {e}")))
        })
        .transpose()
}

/// Parse `name=icon` pairs separated by commas, e.g. `heart=❤️,clap=👏`
fn parse_icons(raw: &str) -> Vec<ReactionIcon> {
    raw.split(',')
        .filter_map(|pair| {
            let (name, icon) = pair.split_once('=')?;
            let name = name.trim();
            (!name.is_empty()).then(|| ReactionIcon {
                name: ReactionKind::from(name),
                icon: icon.trim().to_string(),
                label: None,
            })
        })
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Malformed configuration: {0}")]
    Parse(String),
}
