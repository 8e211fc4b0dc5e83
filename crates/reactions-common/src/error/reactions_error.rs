//! Widget error types
//!
//! Three kinds of failure reach the features: credential problems (never
//! retried), network failures (retried only when the server side is at
//! fault or rate limiting), and configuration problems found at startup.

use reactions_core::DomainError;

use crate::config::ConfigError;

/// Widget-wide error type
#[derive(Debug, thiserror::Error)]
pub enum ReactionsError {
    /// Credential missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Non-2xx response or transport failure
    #[error("Network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
        retryable: bool,
    },

    /// Malformed configuration
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ReactionsError {
    /// Create an authentication error
    #[must_use]
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Network failure for a non-2xx status: retryable iff 5xx or 429
    #[must_use]
    pub fn from_status(message: impl Into<String>, status: u16) -> Self {
        Self::Network {
            message: message.into(),
            status: Some(status),
            retryable: status >= 500 || status == 429,
        }
    }

    /// Network failure without a status (connection refused, reset, ...)
    #[must_use]
    pub fn transport(message: impl Into<String>, retryable: bool) -> Self {
        Self::Network {
            message: message.into(),
            status: None,
            retryable,
        }
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether a retry could plausibly succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { retryable: true, .. })
    }

    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "AUTHENTICATION_FAILED",
            Self::Network {
                status: Some(429), ..
            } => "RATE_LIMITED",
            Self::Network { .. } => "NETWORK_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Message suitable for a transient user notification
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "Please log in to vote or react to posts",
            Self::Network {
                status: Some(429), ..
            } => "Too many requests. Please wait a moment.",
            Self::Network { .. } => "Network error. Please check your connection.",
            Self::Validation(_) | Self::Domain(_) => "An unexpected error occurred",
        }
    }
}

impl From<ConfigError> for ReactionsError {
    fn from(err: ConfigError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for widget operations
pub type ReactionsResult<T> = Result<T, ReactionsError>;
