//! Dispatch logic using the keybindings registry.
//!
//! Matches key events the navigator passed on against the registry and
//! returns the corresponding message.

use super::registry::BINDINGS;
use super::{Action, KeyBinding, KeyPattern, Mode};
use crate::tui::{App, Message};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Determine the current mode from app state.
pub fn current_mode(app: &App) -> Mode {
    if app.document.search_focused() {
        Mode::Search
    } else {
        Mode::Normal
    }
}

/// Map a key event to a message based on the current mode.
pub fn dispatch(app: &App, key: KeyEvent) -> Message {
    if key.kind != KeyEventKind::Press {
        return Message::None;
    }

    let mode = current_mode(app);

    for binding in BINDINGS.iter() {
        if !binding.modes.contains(&mode) {
            continue;
        }

        if matches_pattern(&binding.pattern, &key)
            || binding
                .alternatives
                .iter()
                .any(|alt| matches_pattern(alt, &key))
        {
            return binding_to_message(binding, &key);
        }
    }

    Message::None
}

/// Check if a key event matches a pattern.
fn matches_pattern(pattern: &KeyPattern, key: &KeyEvent) -> bool {
    match pattern {
        KeyPattern::Single(code) => {
            if key.code != *code {
                return false;
            }
            // Allow empty modifiers, or SHIFT for characters that require it
            if key.modifiers.is_empty() {
                return true;
            }
            if key.modifiers == KeyModifiers::SHIFT {
                if let KeyCode::Char(c) = key.code {
                    // Uppercase letters (A-Z) and common shifted symbols
                    return c.is_ascii_uppercase() || "~!@#$%^&*()_+{}|:\"<>?".contains(c);
                }
            }
            false
        }
        KeyPattern::WithModifier { key: code, mods } => {
            key.code == *code && key.modifiers == *mods
        }
        KeyPattern::AnyChar => {
            matches!(key.code, KeyCode::Char(c) if !c.is_control())
                && key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
        }
    }
}

/// Convert a matched binding to the appropriate message.
fn binding_to_message(binding: &KeyBinding, key: &KeyEvent) -> Message {
    match binding.action {
        Action::Quit => Message::Quit,
        Action::Reload => Message::Reload,
        Action::ToggleVerified => Message::ToggleVerified,
        Action::ToggleUnverified => Message::ToggleUnverified,
        Action::CyclePackageType => Message::CyclePackageType,
        Action::CycleCategory => Message::CycleCategory,
        Action::CycleAppSet => Message::CycleAppSet,
        Action::CycleDateRange => Message::CycleDateRange,
        Action::ClearAllFilters => Message::ClearAllFilters,
        Action::SearchInput => match key.code {
            KeyCode::Char(c) => Message::SearchInput(c),
            _ => Message::None,
        },
        Action::SearchBackspace => Message::SearchBackspace,
        Action::SearchEscape => Message::SearchEscape,
        Action::SearchConfirm => Message::SearchConfirm,
        Action::SearchNextResult => Message::SearchNextResult,
        Action::SearchPrevResult => Message::SearchPrevResult,
    }
}
