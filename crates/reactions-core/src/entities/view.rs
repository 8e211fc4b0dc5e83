//! Post view model
//!
//! The in-memory record of what a post's vote and reaction controls show.
//! Renderers project this state onto whatever surface hosts the widget; the
//! core never reads state back from that surface.

use std::collections::HashMap;

use crate::value_objects::{ReactionKind, VoteChoice, VoteMode};

/// Active flag and count of a single control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub active: bool,
    pub count: u32,
}

impl ButtonState {
    pub fn new(active: bool, count: u32) -> Self {
        Self { active, count }
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Decrement, flooring at zero
    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
    }
}

/// One selectable reaction of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionOption {
    pub kind: ReactionKind,
    pub icon: String,
    pub state: ButtonState,
}

/// Everything the vote and reaction controls of one post display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostView {
    pub upvote: Option<ButtonState>,
    pub downvote: Option<ButtonState>,
    pub reactions: Vec<ReactionOption>,
}

impl PostView {
    /// Build a zero-initialized view for the configured controls
    pub fn new<I>(votes: VoteMode, reaction_icons: I) -> Self
    where
        I: IntoIterator<Item = (ReactionKind, String)>,
    {
        Self {
            upvote: votes.is_enabled().then(ButtonState::default),
            downvote: votes.has_downvote().then(ButtonState::default),
            reactions: reaction_icons
                .into_iter()
                .map(|(kind, icon)| ReactionOption {
                    kind,
                    icon,
                    state: ButtonState::default(),
                })
                .collect(),
        }
    }

    // === Votes ===

    pub fn button(&self, choice: VoteChoice) -> Option<&ButtonState> {
        match choice {
            VoteChoice::Like => self.upvote.as_ref(),
            VoteChoice::Dislike => self.downvote.as_ref(),
        }
    }

    pub fn button_mut(&mut self, choice: VoteChoice) -> Option<&mut ButtonState> {
        match choice {
            VoteChoice::Like => self.upvote.as_mut(),
            VoteChoice::Dislike => self.downvote.as_mut(),
        }
    }

    /// Whether the button for `choice` is currently marked as the viewer's choice
    pub fn is_vote_active(&self, choice: VoteChoice) -> bool {
        self.button(choice).is_some_and(|b| b.active)
    }

    /// The vote currently shown as the viewer's
    pub fn active_vote(&self) -> Option<VoteChoice> {
        [VoteChoice::Like, VoteChoice::Dislike]
            .into_iter()
            .find(|choice| self.is_vote_active(*choice))
    }

    /// Overwrite vote counts and active flags (bulk-load reconciliation)
    pub fn set_votes(&mut self, likes: u32, dislikes: u32, own: Option<VoteChoice>) {
        if let Some(up) = self.upvote.as_mut() {
            *up = ButtonState::new(own == Some(VoteChoice::Like), likes);
        }
        if let Some(down) = self.downvote.as_mut() {
            *down = ButtonState::new(own == Some(VoteChoice::Dislike), dislikes);
        }
    }

    // === Reactions ===

    pub fn option(&self, kind: &ReactionKind) -> Option<&ReactionOption> {
        self.reactions.iter().find(|opt| &opt.kind == kind)
    }

    pub fn option_mut(&mut self, kind: &ReactionKind) -> Option<&mut ReactionOption> {
        self.reactions.iter_mut().find(|opt| &opt.kind == kind)
    }

    pub fn has_reaction(&self, kind: &ReactionKind) -> bool {
        self.option(kind).is_some()
    }

    pub fn is_reaction_active(&self, kind: &ReactionKind) -> bool {
        self.option(kind).is_some_and(|opt| opt.state.active)
    }

    /// The reaction currently shown as the viewer's
    pub fn active_reaction(&self) -> Option<&ReactionKind> {
        self.reactions
            .iter()
            .find(|opt| opt.state.active)
            .map(|opt| &opt.kind)
    }

    /// Overwrite reaction counts and active flags (bulk-load reconciliation).
    /// Options missing from `counts` are reset to zero.
    pub fn set_reactions(&mut self, counts: &HashMap<ReactionKind, u32>, own: Option<&ReactionKind>) {
        for opt in &mut self.reactions {
            opt.state = ButtonState::new(
                own == Some(&opt.kind),
                counts.get(&opt.kind).copied().unwrap_or(0),
            );
        }
    }

    /// Compact projection: only reactions that have been used, plus whether
    /// the "add reaction" affordance should be shown instead.
    pub fn compact(&self) -> CompactView<'_> {
        let options: Vec<_> = self.reactions.iter().filter(|opt| opt.state.count > 0).collect();
        CompactView {
            show_add_button: options.is_empty(),
            options,
        }
    }
}

/// Reactions with a non-zero count, for the collapsed presentation
#[derive(Debug, PartialEq, Eq)]
pub struct CompactView<'a> {
    pub options: Vec<&'a ReactionOption>,
    pub show_add_button: bool,
}
