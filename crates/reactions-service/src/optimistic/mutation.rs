//! View mutations for a single click
//!
//! Used speculatively by the ledger and directly once a write succeeds when
//! optimistic updates are off. Counts never go below zero.

use reactions_core::{PostView, ReactionKind, VoteChoice};

/// Apply a click on the `choice` vote button.
///
/// `removing` is whether that button was already active; `previous` is the
/// viewer's persisted vote before the click.
pub fn apply_vote_change(
    view: &mut PostView,
    choice: VoteChoice,
    removing: bool,
    previous: Option<VoteChoice>,
) {
    let other = choice.opposite();
    let switching = !removing && previous == Some(other);

    if let Some(button) = view.button_mut(choice) {
        button.active = !removing;
        if removing {
            button.decrement();
        } else {
            button.increment();
        }
    } else {
        return;
    }

    if let Some(button) = view.button_mut(other) {
        button.active = false;
        if switching {
            button.decrement();
        }
    }
}

/// Apply a click on the `kind` reaction. Reactions are single-select.
///
/// Returns `false` (and leaves the view untouched) if the post has no such
/// reaction option.
pub fn apply_reaction_change(
    view: &mut PostView,
    kind: &ReactionKind,
    removing: bool,
    previous: Option<&ReactionKind>,
) -> bool {
    if !view.has_reaction(kind) {
        return false;
    }

    for option in &mut view.reactions {
        option.state.active = false;
    }

    match previous {
        Some(old) if old != kind => {
            if let Some(option) = view.option_mut(old) {
                option.state.decrement();
            }
            if let Some(option) = view.option_mut(kind) {
                option.state.increment();
            }
        }
        _ => {
            if let Some(option) = view.option_mut(kind) {
                if removing {
                    option.state.decrement();
                } else {
                    option.state.increment();
                }
            }
        }
    }

    if !removing {
        if let Some(option) = view.option_mut(kind) {
            option.state.active = true;
        }
    }

    true
}
