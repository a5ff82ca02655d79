//! Static registry of app-level keybindings.
//!
//! Both dispatch logic and help generation derive from this registry.

use super::{Action, Category, KeyBinding, KeyPattern, Mode};
use crossterm::event::{KeyCode, KeyModifiers};

/// All app-level keybindings.
///
/// The dispatch system searches this list in order, so the catch-all text
/// binding in search mode must come last.
pub static BINDINGS: &[KeyBinding] = &[
    // ═══════════════════════════════════════════════════════════════════════════
    // BOTH MODES
    // ═══════════════════════════════════════════════════════════════════════════
    KeyBinding {
        modes: &[Mode::Normal, Mode::Search],
        pattern: KeyPattern::WithModifier {
            key: KeyCode::Char('c'),
            mods: KeyModifiers::CONTROL,
        },
        description: "Quit",
        category: Category::Application,
        alternatives: &[],
        show_in_help: false,
        action: Action::Quit,
    },
    // ═══════════════════════════════════════════════════════════════════════════
    // NORMAL MODE
    // ═══════════════════════════════════════════════════════════════════════════

    // Filters
    KeyBinding {
        modes: &[Mode::Normal],
        pattern: KeyPattern::Single(KeyCode::Char('v')),
        description: "Toggle verified only",
        category: Category::Filters,
        alternatives: &[],
        show_in_help: true,
        action: Action::ToggleVerified,
    },
    KeyBinding {
        modes: &[Mode::Normal],
        pattern: KeyPattern::Single(KeyCode::Char('u')),
        description: "Toggle unverified only",
        category: Category::Filters,
        alternatives: &[],
        show_in_help: true,
        action: Action::ToggleUnverified,
    },
    KeyBinding {
        modes: &[Mode::Normal],
        pattern: KeyPattern::Single(KeyCode::Char('p')),
        description: "Cycle package type",
        category: Category::Filters,
        alternatives: &[],
        show_in_help: true,
        action: Action::CyclePackageType,
    },
    KeyBinding {
        modes: &[Mode::Normal],
        pattern: KeyPattern::Single(KeyCode::Char('c')),
        description: "Cycle category",
        category: Category::Filters,
        alternatives: &[],
        show_in_help: true,
        action: Action::CycleCategory,
    },
    KeyBinding {
        modes: &[Mode::Normal],
        pattern: KeyPattern::Single(KeyCode::Char('a')),
        description: "Cycle app set",
        category: Category::Filters,
        alternatives: &[],
        show_in_help: true,
        action: Action::CycleAppSet,
    },
    KeyBinding {
        modes: &[Mode::Normal],
        pattern: KeyPattern::Single(KeyCode::Char('d')),
        description: "Cycle updated within",
        category: Category::Filters,
        alternatives: &[],
        show_in_help: true,
        action: Action::CycleDateRange,
    },
    KeyBinding {
        modes: &[Mode::Normal],
        pattern: KeyPattern::Single(KeyCode::Char('x')),
        description: "Clear all filters",
        category: Category::Filters,
        alternatives: &[],
        show_in_help: true,
        action: Action::ClearAllFilters,
    },
    // Application
    KeyBinding {
        modes: &[Mode::Normal],
        pattern: KeyPattern::Single(KeyCode::Char('r')),
        description: "Reload catalog",
        category: Category::Application,
        alternatives: &[],
        show_in_help: true,
        action: Action::Reload,
    },
    KeyBinding {
        modes: &[Mode::Normal],
        pattern: KeyPattern::Single(KeyCode::Char('q')),
        description: "Quit",
        category: Category::Application,
        alternatives: &[KeyPattern::WithModifier {
            key: KeyCode::Char('c'),
            mods: KeyModifiers::CONTROL,
        }],
        show_in_help: true,
        action: Action::Quit,
    },
    // ═══════════════════════════════════════════════════════════════════════════
    // SEARCH MODE
    // ═══════════════════════════════════════════════════════════════════════════
    KeyBinding {
        modes: &[Mode::Search],
        pattern: KeyPattern::Single(KeyCode::Enter),
        description: "Jump to selected app",
        category: Category::Search,
        alternatives: &[],
        show_in_help: true,
        action: Action::SearchConfirm,
    },
    KeyBinding {
        modes: &[Mode::Search],
        pattern: KeyPattern::Single(KeyCode::Esc),
        description: "Clear search, then leave it",
        category: Category::Search,
        alternatives: &[],
        show_in_help: true,
        action: Action::SearchEscape,
    },
    KeyBinding {
        modes: &[Mode::Search],
        pattern: KeyPattern::Single(KeyCode::Down),
        description: "Next result",
        category: Category::Search,
        alternatives: &[],
        show_in_help: true,
        action: Action::SearchNextResult,
    },
    KeyBinding {
        modes: &[Mode::Search],
        pattern: KeyPattern::Single(KeyCode::Up),
        description: "Previous result",
        category: Category::Search,
        alternatives: &[],
        show_in_help: true,
        action: Action::SearchPrevResult,
    },
    KeyBinding {
        modes: &[Mode::Search],
        pattern: KeyPattern::Single(KeyCode::Backspace),
        description: "Delete character",
        category: Category::Search,
        alternatives: &[],
        show_in_help: false,
        action: Action::SearchBackspace,
    },
    KeyBinding {
        modes: &[Mode::Search],
        pattern: KeyPattern::AnyChar,
        description: "Type to search app names",
        category: Category::Search,
        alternatives: &[],
        show_in_help: false,
        action: Action::SearchInput,
    },
];
