//! Centralized app-level keybindings.
//!
//! The registry defines the bindings; dispatch and help text are derived
//! from it. Card navigation keys live with the navigator and are merged into
//! the help text here.

mod dispatch;
mod help;
mod registry;

pub use dispatch::{current_mode, dispatch};
pub use help::{generate_footer_hints, generate_keyboard_shortcuts, HELP_TITLE};

use crossterm::event::{KeyCode, KeyModifiers};

/// All contexts where keybindings apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Card list, nothing typed into
    Normal,
    /// Search input has focus
    Search,
}

impl Mode {
    /// Returns true if this mode accepts text input (chars are not dispatched as commands).
    pub fn is_text_input(&self) -> bool {
        matches!(self, Mode::Search)
    }
}

/// Categories for grouping bindings in help display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Navigation,
    Search,
    Filters,
    Application,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Navigation => "Navigation",
            Category::Search => "Search",
            Category::Filters => "Filters",
            Category::Application => "Application",
        }
    }
}

/// Pattern for matching key events.
#[derive(Debug, Clone)]
pub enum KeyPattern {
    /// Single key without modifiers (e.g., 'v', Enter, Esc)
    Single(KeyCode),
    /// Key with modifiers (e.g., Ctrl+c)
    WithModifier { key: KeyCode, mods: KeyModifiers },
    /// Any printable character
    AnyChar,
}

impl KeyPattern {
    /// Format this pattern for display in help text.
    pub fn display(&self) -> String {
        match self {
            KeyPattern::Single(code) => format_keycode(code),
            KeyPattern::WithModifier { key, mods } => {
                let mut result = String::new();
                if mods.contains(KeyModifiers::CONTROL) {
                    result.push_str("Ctrl+");
                }
                if mods.contains(KeyModifiers::ALT) {
                    result.push_str("Alt+");
                }
                if mods.contains(KeyModifiers::SHIFT) {
                    result.push_str("Shift+");
                }
                result.push_str(&format_keycode(key));
                result
            }
            KeyPattern::AnyChar => "text".to_string(),
        }
    }
}

/// Format a KeyCode for display.
fn format_keycode(code: &KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        _ => format!("{:?}", code),
    }
}

/// A complete keybinding definition.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// Modes where this binding applies
    pub modes: &'static [Mode],
    /// The key pattern to match
    pub pattern: KeyPattern,
    /// Human-readable description for help text
    pub description: &'static str,
    /// Category for grouping in help
    pub category: Category,
    /// Alternative key patterns (e.g., q and Ctrl+c for quit)
    pub alternatives: &'static [KeyPattern],
    /// Whether to show this binding in help (false for internal bindings)
    pub show_in_help: bool,
    /// Message produced when the binding matches
    pub action: Action,
}

/// What a matched binding does. Parameterized messages are built from the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Reload,
    ToggleVerified,
    ToggleUnverified,
    CyclePackageType,
    CycleCategory,
    CycleAppSet,
    CycleDateRange,
    ClearAllFilters,
    SearchInput,
    SearchBackspace,
    SearchEscape,
    SearchConfirm,
    SearchNextResult,
    SearchPrevResult,
}
