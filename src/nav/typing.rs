//! Typing-context detection.
//!
//! Navigation shortcuts must stay out of the way while the user is entering
//! text, so every key is first checked against the element that has focus.

/// Kind of element that can hold keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Single-line text entry
    Input,
    /// Multi-line text entry
    TextArea,
    Button,
    Select,
    Div,
}

/// Region of the page an element is nested in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    SearchBar,
    FilterBar,
    HelpModal,
    Main,
}

/// A focusable element as seen by the key dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub content_editable: bool,
    pub container: Option<Container>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            content_editable: false,
            container: None,
        }
    }

    pub fn within(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    pub fn editable(mut self) -> Self {
        self.content_editable = true;
        self
    }

    /// The page body, which holds focus when no control does.
    pub fn body() -> Self {
        Self::new(Tag::Div).within(Container::Main)
    }
}

/// True if keystrokes on `target` should be treated as text entry.
pub fn is_typing_context(target: Option<&Element>) -> bool {
    let Some(el) = target else {
        return false;
    };

    matches!(el.tag, Tag::Input | Tag::TextArea)
        || el.content_editable
        || el.container == Some(Container::SearchBar)
}
