//! Result of a single click

/// How a click ended. `C` is the choice type (`VoteChoice` or `ReactionKind`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome<C> {
    /// A later click on the same control superseded this one
    Debounced,
    /// A write for the same post and kind was already in flight
    Busy,
    /// A `before_*` hook refused the action
    Vetoed,
    /// The server accepted the write; `None` means the choice was cleared
    Committed(Option<C>),
    /// The write failed and any optimistic change was undone
    RolledBack,
}

impl<C> InteractionOutcome<C> {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// Whether a write was attempted
    pub fn reached_server(&self) -> bool {
        matches!(self, Self::Committed(_) | Self::RolledBack)
    }
}
