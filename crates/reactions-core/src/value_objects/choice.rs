//! Vote and reaction choices

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A vote on a post. "No vote" is represented as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Like,
    Dislike,
}

impl VoteChoice {
    /// Wire name used by the reactions service
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// The mutually exclusive counterpart
    pub const fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(DomainError::InvalidVoteChoice(other.to_string())),
        }
    }
}

/// A reaction name from the configured set (e.g. "heart", "clap").
/// "No reaction" is represented as `Option::None`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionKind(String);

impl ReactionKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReactionKind {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Interaction type, used to key in-flight guards and debounce timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Vote,
    Reaction,
}

impl InteractionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vote => "vote",
            Self::Reaction => "reaction",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which vote buttons a post gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoteMode {
    /// No vote buttons
    Disabled,
    /// Upvote button only
    UpOnly,
    /// Upvote and downvote buttons
    #[default]
    Full,
}

impl VoteMode {
    #[inline]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    #[inline]
    pub fn has_downvote(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl FromStr for VoteMode {
    type Err = DomainError;

    /// Accepts the boolean spellings used by page integrations as well as
    /// the mode names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "full" => Ok(Self::Full),
            "false" | "disabled" => Ok(Self::Disabled),
            "up-only" | "up_only" => Ok(Self::UpOnly),
            other => Err(DomainError::InvalidVoteMode(other.to_string())),
        }
    }
}

// Page integrations pass `true`/`false` as well as mode names
impl<'de> Deserialize<'de> for VoteMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(Self::Full),
            Raw::Flag(false) => Ok(Self::Disabled),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}
