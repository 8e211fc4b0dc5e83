//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid vote choice: {0}")]
    InvalidVoteChoice(String),

    #[error("Invalid vote mode: {0}")]
    InvalidVoteMode(String),

    #[error("Unknown reaction: {0}")]
    UnknownReaction(String),

    #[error("Post not registered: {0}")]
    UnknownPost(String),

    #[error("Vote button not present: {0}")]
    MissingVoteButton(&'static str),
}

impl DomainError {
    /// Get an error code string for logs and notifications
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidVoteChoice(_) => "INVALID_VOTE_CHOICE",
            Self::InvalidVoteMode(_) => "INVALID_VOTE_MODE",
            Self::UnknownReaction(_) => "UNKNOWN_REACTION",
            Self::UnknownPost(_) => "UNKNOWN_POST",
            Self::MissingVoteButton(_) => "MISSING_VOTE_BUTTON",
        }
    }
}
