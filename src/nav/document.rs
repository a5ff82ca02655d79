//! The page model the navigator acts on.
//!
//! Cards are stacked vertically on a scrollable canvas measured in terminal
//! rows. A sticky header overlays the top `header_height` rows of the
//! viewport, so anything scrolled to must land below it.

use crate::data::AppEntry;
use crate::theme::Theme;

use super::typing::{Container, Element, Tag};

/// Rows kept between the sticky header and a focused card.
pub const SCROLL_MARGIN: i64 = 8;
/// Blank rows between cards
pub const CARD_GAP: i64 = 1;
/// Releases listed per card
pub const MAX_RELEASE_LINES: usize = 3;

/// Opaque handle to a card in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

/// A displayable release card
#[derive(Debug, Clone, Default)]
pub struct Card {
    pub app: AppEntry,
    /// Primary heading (app name)
    pub title: Option<String>,
    /// Secondary heading (current version)
    pub subtitle: Option<String>,
    pub links: Vec<String>,
    /// Absolute row of the card's top border
    pub top: i64,
    pub height: i64,
    pub visible: bool,
    /// Keyboard-focus marker
    pub focused: bool,
}

impl Card {
    pub fn from_app(app: AppEntry) -> Self {
        let links = app.links();
        Self {
            title: Some(app.name.clone()),
            subtitle: app.version.clone(),
            links,
            app,
            top: 0,
            height: 0,
            visible: true,
            focused: false,
        }
    }

    /// Rows the card occupies when shown
    pub fn natural_height(&self) -> i64 {
        // borders + title + summary + meta
        let mut rows = 5;
        if !self.links.is_empty() {
            rows += 1;
        }
        rows + self.app.releases.len().min(MAX_RELEASE_LINES) as i64
    }
}

/// Assistive-technology announcement area
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveRegion {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpModal {
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub value: String,
    pub focused: bool,
    /// Whole value selected; the next keystroke replaces it
    pub all_selected: bool,
}

impl SearchInput {
    pub fn insert(&mut self, c: char) {
        if self.all_selected {
            self.value.clear();
            self.all_selected = false;
        }
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        if self.all_selected {
            self.value.clear();
            self.all_selected = false;
        } else {
            self.value.pop();
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.all_selected = false;
    }
}

/// Viewport scroll position with an optional smooth-scroll target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scroll {
    pub offset: i64,
    pub target: Option<i64>,
}

/// Which optional page elements exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageElements {
    pub search_bar: bool,
    pub filter_bar: bool,
    pub live_region: bool,
    pub help_modal: bool,
}

impl Default for PageElements {
    fn default() -> Self {
        Self {
            search_bar: true,
            filter_bar: true,
            live_region: true,
            help_modal: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub cards: Vec<Card>,
    pub header_height: i64,
    pub viewport_height: i64,
    pub content_height: i64,
    pub scroll: Scroll,
    pub live_region: Option<LiveRegion>,
    pub help_modal: Option<HelpModal>,
    pub search_input: Option<SearchInput>,
    pub filter_bar: bool,
    pub theme: Theme,
}

impl Document {
    pub fn new(cards: Vec<Card>, elements: PageElements) -> Self {
        // title row + separator, then the optional bars
        let mut header_height = 2;
        if elements.search_bar {
            header_height += 1;
        }
        if elements.filter_bar {
            header_height += 2;
        }

        let mut doc = Self {
            cards,
            header_height,
            viewport_height: 24,
            content_height: 0,
            scroll: Scroll::default(),
            live_region: elements.live_region.then(LiveRegion::default),
            help_modal: elements.help_modal.then(HelpModal::default),
            search_input: elements.search_bar.then(SearchInput::default),
            filter_bar: elements.filter_bar,
            theme: Theme::default(),
        };
        doc.layout();
        doc
    }

    pub fn from_apps(apps: &[AppEntry], elements: PageElements) -> Self {
        let cards = apps.iter().cloned().map(Card::from_app).collect();
        Self::new(cards, elements)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0)
    }

    /// Handles of all shown cards, top to bottom
    pub fn visible_items(&self) -> Vec<CardId> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible)
            .map(|(i, _)| CardId(i))
            .collect()
    }

    /// Cards currently carrying the focus marker
    pub fn focused_cards(&self) -> Vec<CardId> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.focused)
            .map(|(i, _)| CardId(i))
            .collect()
    }

    pub fn set_visible(&mut self, id: CardId, visible: bool) {
        if let Some(card) = self.cards.get_mut(id.0) {
            card.visible = visible;
        }
    }

    pub fn set_focus_marker(&mut self, id: CardId, focused: bool) {
        if let Some(card) = self.cards.get_mut(id.0) {
            card.focused = focused;
        }
    }

    /// Recompute card positions after visibility changes.
    pub fn layout(&mut self) {
        let mut y = self.header_height + 1;
        for card in &mut self.cards {
            if card.visible {
                card.top = y;
                card.height = card.natural_height();
                y += card.height + CARD_GAP;
            } else {
                card.height = 0;
            }
        }
        self.content_height = y;
        self.clamp_scroll();
    }

    pub fn set_viewport_height(&mut self, rows: i64) {
        self.viewport_height = rows.max(1);
        self.clamp_scroll();
    }

    pub fn max_scroll(&self) -> i64 {
        (self.content_height - self.viewport_height).max(0)
    }

    pub fn scroll_y(&self) -> i64 {
        self.scroll.offset
    }

    /// Start a smooth scroll towards `y`, replacing any scroll in flight.
    pub fn scroll_to(&mut self, y: i64) {
        self.scroll.target = Some(y.clamp(0, self.max_scroll()));
    }

    /// Smooth scroll relative to the current position.
    pub fn scroll_by(&mut self, delta: i64) {
        self.scroll_to(self.scroll.offset.saturating_add(delta));
    }

    /// Advance the scroll animation by one frame. Returns true while moving.
    pub fn step_scroll(&mut self) -> bool {
        let Some(target) = self.scroll.target else {
            return false;
        };

        let distance = target - self.scroll.offset;
        if distance == 0 {
            self.scroll.target = None;
            return false;
        }

        let step = distance / 3;
        let step = if step == 0 { distance.signum() } else { step };
        self.scroll.offset += step;
        if self.scroll.offset == target {
            self.scroll.target = None;
        }
        true
    }

    /// Jump to the end of any scroll in flight.
    pub fn settle_scroll(&mut self) {
        if let Some(target) = self.scroll.target.take() {
            self.scroll.offset = target;
        }
    }

    fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        self.scroll.offset = self.scroll.offset.clamp(0, max);
        if let Some(t) = self.scroll.target {
            self.scroll.target = Some(t.clamp(0, max));
        }
    }

    /// Replace the live-region text. No-op without a live region.
    pub fn announce(&mut self, text: &str) {
        if let Some(region) = &mut self.live_region {
            region.text = text.to_string();
        }
    }

    pub fn announcement(&self) -> Option<&str> {
        self.live_region
            .as_ref()
            .map(|r| r.text.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn show_help(&mut self) {
        if let Some(modal) = &mut self.help_modal {
            modal.visible = true;
        }
    }

    pub fn hide_help(&mut self) {
        if let Some(modal) = &mut self.help_modal {
            modal.visible = false;
        }
    }

    pub fn help_visible(&self) -> bool {
        self.help_modal.as_ref().map(|m| m.visible).unwrap_or(false)
    }

    /// Focus the search input and select its text.
    pub fn focus_search(&mut self) {
        if let Some(input) = &mut self.search_input {
            input.focused = true;
            input.all_selected = !input.value.is_empty();
        }
    }

    pub fn blur_search(&mut self) {
        if let Some(input) = &mut self.search_input {
            input.focused = false;
            input.all_selected = false;
        }
    }

    pub fn search_focused(&self) -> bool {
        self.search_input
            .as_ref()
            .map(|i| i.focused)
            .unwrap_or(false)
    }

    /// Element that currently receives keystrokes
    pub fn active_element(&self) -> Option<Element> {
        if self.search_focused() {
            Some(Element::new(Tag::Input).within(Container::SearchBar))
        } else {
            Some(Element::body())
        }
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
