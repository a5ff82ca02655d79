//! Keyboard navigation across release cards.
//!
//! The [`Navigator`] is the key dispatcher: it owns the focus state, reads a
//! key event plus the [`Document`], and applies at most one action per key.
//! Everything else in this module is either a pure helper or operates on
//! state passed in by the caller.

pub mod announce;
pub mod document;
pub mod focus;
pub mod index;
pub mod links;
pub mod typing;

pub use announce::announcement_text;
pub use document::{Card, CardId, Document, PageElements};
pub use focus::focus_item;
pub use index::{next_index, prev_index};
pub use links::{open_focused, LinkOpener, SystemOpener};
pub use typing::{is_typing_context, Container, Element, Tag};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Handler invoked by the theme key, supplied by whoever owns theming.
pub type ThemeToggle = Box<dyn FnMut(&mut Document) + Send>;

/// Result of offering a key to the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Consumed; the key's default handling is suppressed
    Handled,
    /// Not ours; pass it on to the focused element
    Ignored,
}

/// Actions bound to navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    FocusSearch,
    OpenFocused,
    ShowHelp,
    ToggleTheme,
    PageDown,
    PageUp,
    Top,
    Escape,
}

impl NavCommand {
    pub const ALL: [NavCommand; 10] = [
        NavCommand::Next,
        NavCommand::Prev,
        NavCommand::FocusSearch,
        NavCommand::OpenFocused,
        NavCommand::ShowHelp,
        NavCommand::ToggleTheme,
        NavCommand::PageDown,
        NavCommand::PageUp,
        NavCommand::Top,
        NavCommand::Escape,
    ];

    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        Some(match key.code {
            KeyCode::Char('j') => NavCommand::Next,
            KeyCode::Char('k') => NavCommand::Prev,
            KeyCode::Char('/') | KeyCode::Char('s') => NavCommand::FocusSearch,
            KeyCode::Char('o') | KeyCode::Enter => NavCommand::OpenFocused,
            KeyCode::Char('?') => NavCommand::ShowHelp,
            KeyCode::Char('t') => NavCommand::ToggleTheme,
            KeyCode::Char(' ') if shift => NavCommand::PageUp,
            KeyCode::Char(' ') => NavCommand::PageDown,
            KeyCode::Char('h') => NavCommand::Top,
            KeyCode::Esc => NavCommand::Escape,
            _ => return None,
        })
    }

    /// Key label for the help modal
    pub fn keys(&self) -> &'static str {
        match self {
            NavCommand::Next => "j",
            NavCommand::Prev => "k",
            NavCommand::FocusSearch => "/, s",
            NavCommand::OpenFocused => "o, Enter",
            NavCommand::ShowHelp => "?",
            NavCommand::ToggleTheme => "t",
            NavCommand::PageDown => "Space",
            NavCommand::PageUp => "Shift+Space",
            NavCommand::Top => "h",
            NavCommand::Escape => "Esc",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            NavCommand::Next => "Next app",
            NavCommand::Prev => "Previous app",
            NavCommand::FocusSearch => "Focus search",
            NavCommand::OpenFocused => "Open focused app",
            NavCommand::ShowHelp => "Show keyboard shortcuts",
            NavCommand::ToggleTheme => "Toggle light/dark theme",
            NavCommand::PageDown => "Page down",
            NavCommand::PageUp => "Page up",
            NavCommand::Top => "Scroll to top",
            NavCommand::Escape => "Close help / clear focus",
        }
    }
}

/// Focus state: `focused_index` is -1 when nothing is focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub focused_index: isize,
    pub items: Vec<CardId>,
}

impl NavigationState {
    pub fn new(items: Vec<CardId>) -> Self {
        Self {
            focused_index: -1,
            items,
        }
    }

    pub fn focused(&self) -> Option<CardId> {
        usize::try_from(self.focused_index)
            .ok()
            .and_then(|i| self.items.get(i))
            .copied()
    }
}

/// Keyboard navigation session over a list of cards
pub struct Navigator {
    state: NavigationState,
    opener: Box<dyn LinkOpener>,
    theme_toggle: Option<ThemeToggle>,
}

impl Navigator {
    pub fn new(
        items: Vec<CardId>,
        opener: Box<dyn LinkOpener>,
        theme_toggle: Option<ThemeToggle>,
    ) -> Self {
        tracing::info!("keyboard navigation initialized with {} items", items.len());
        Self {
            state: NavigationState::new(items),
            opener,
            theme_toggle,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn focused_index(&self) -> isize {
        self.state.focused_index
    }

    /// Offer a key event. Keys typed into a text field are never consumed.
    pub fn handle_key(&mut self, key: &KeyEvent, doc: &mut Document) -> KeyOutcome {
        if is_typing_context(doc.active_element().as_ref()) {
            return KeyOutcome::Ignored;
        }

        match NavCommand::from_key(key) {
            Some(cmd) => {
                self.apply(cmd, doc);
                KeyOutcome::Handled
            }
            None => KeyOutcome::Ignored,
        }
    }

    pub fn apply(&mut self, cmd: NavCommand, doc: &mut Document) {
        let len = self.state.items.len();

        match cmd {
            NavCommand::Next => {
                if len > 0 {
                    let index = next_index(self.state.focused_index, len as isize - 1);
                    self.state.focused_index = index;
                    focus_item(index, &self.state.items, doc);
                }
            }
            NavCommand::Prev => {
                if len > 0 {
                    let index = prev_index(self.state.focused_index);
                    self.state.focused_index = index;
                    focus_item(index, &self.state.items, doc);
                }
            }
            NavCommand::FocusSearch => doc.focus_search(),
            NavCommand::OpenFocused => open_focused(
                self.state.focused_index,
                &self.state.items,
                doc,
                self.opener.as_mut(),
            ),
            NavCommand::ShowHelp => doc.show_help(),
            NavCommand::ToggleTheme => {
                if let Some(toggle) = self.theme_toggle.as_mut() {
                    toggle(doc);
                }
            }
            NavCommand::PageDown => doc.scroll_by(doc.viewport_height),
            NavCommand::PageUp => doc.scroll_by(-doc.viewport_height),
            NavCommand::Top => doc.scroll_to(0),
            NavCommand::Escape => self.escape(doc),
        }
    }

    fn escape(&mut self, doc: &mut Document) {
        if doc.help_visible() {
            doc.hide_help();
            return;
        }

        if doc.search_focused() {
            doc.blur_search();
            return;
        }

        focus::clear_focus_markers(&self.state.items, doc);
        self.state.focused_index = -1;
    }

    /// Track a new item set (after filtering or reload). Focus starts over.
    pub fn refresh(&mut self, items: Vec<CardId>, doc: &mut Document) {
        focus::clear_focus_markers(&self.state.items, doc);
        self.state = NavigationState::new(items);
        tracing::debug!("navigation refreshed, now tracking {} items", self.state.items.len());
    }
}
