//! Tests for app-level keybinding dispatch and the navigator/app key split.
//!
//! Keys reach the registry only after the navigator passes on them, so these
//! tests cover both the registry itself and the routing in `App::handle_key`.

mod test_utils;

use bluefin_releases::tui::keybindings::{dispatch, generate_keyboard_shortcuts, Mode};
use bluefin_releases::tui::{App, Message};
use crossterm::event::{KeyCode, KeyModifiers};
use test_utils::{catalog_of, char_key, key_event, key_event_with, test_config, RecordingOpener};

// ============================================================================
// Test Helpers
// ============================================================================

fn test_app() -> App {
    App::with_handlers(
        test_config(),
        catalog_of(4),
        Box::new(RecordingOpener::default()),
        None,
    )
}

fn search_app() -> App {
    let mut app = test_app();
    app.document.focus_search();
    app
}

// ============================================================================
// Normal Mode
// ============================================================================

#[test]
fn test_filter_keys_map_to_messages() {
    let app = test_app();
    let cases = [
        ('v', Message::ToggleVerified),
        ('u', Message::ToggleUnverified),
        ('p', Message::CyclePackageType),
        ('c', Message::CycleCategory),
        ('a', Message::CycleAppSet),
        ('d', Message::CycleDateRange),
        ('x', Message::ClearAllFilters),
        ('r', Message::Reload),
        ('q', Message::Quit),
    ];
    for (c, expected) in cases {
        assert_eq!(dispatch(&app, char_key(c)), expected, "key {c}");
    }
}

#[test]
fn test_ctrl_c_quits_in_both_modes() {
    let ctrl_c = key_event_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(dispatch(&test_app(), ctrl_c), Message::Quit);
    assert_eq!(dispatch(&search_app(), ctrl_c), Message::Quit);
}

#[test]
fn test_uppercase_filter_key_does_not_match() {
    let app = test_app();
    let shift_v = key_event_with(KeyCode::Char('V'), KeyModifiers::SHIFT);
    assert_eq!(dispatch(&app, shift_v), Message::None);
}

#[test]
fn test_unbound_key_is_none() {
    assert_eq!(dispatch(&test_app(), char_key('z')), Message::None);
}

// ============================================================================
// Search Mode
// ============================================================================

#[test]
fn test_search_mode_chars_become_input() {
    let app = search_app();
    assert_eq!(dispatch(&app, char_key('q')), Message::SearchInput('q'));
    assert_eq!(dispatch(&app, char_key('j')), Message::SearchInput('j'));
    let shift_m = key_event_with(KeyCode::Char('M'), KeyModifiers::SHIFT);
    assert_eq!(dispatch(&app, shift_m), Message::SearchInput('M'));
}

#[test]
fn test_search_mode_editing_keys() {
    let app = search_app();
    assert_eq!(dispatch(&app, key_event(KeyCode::Esc)), Message::SearchEscape);
    assert_eq!(dispatch(&app, key_event(KeyCode::Enter)), Message::SearchConfirm);
    assert_eq!(dispatch(&app, key_event(KeyCode::Backspace)), Message::SearchBackspace);
    assert_eq!(dispatch(&app, key_event(KeyCode::Down)), Message::SearchNextResult);
    assert_eq!(dispatch(&app, key_event(KeyCode::Up)), Message::SearchPrevResult);
}

// ============================================================================
// Routing Through App::handle_key
// ============================================================================

#[test]
fn test_navigator_consumes_j_before_registry() {
    let mut app = test_app();
    let quit = app.handle_key(char_key('j')).unwrap();
    assert!(!quit);
    assert_eq!(app.navigator.focused_index(), 0);
}

#[test]
fn test_q_quits_through_handle_key() {
    let mut app = test_app();
    assert!(app.handle_key(char_key('q')).unwrap());
}

#[test]
fn test_typing_in_search_goes_to_input_not_navigation() {
    let mut app = test_app();
    app.handle_key(char_key('/')).unwrap();
    for c in "jq".chars() {
        assert!(!app.handle_key(char_key(c)).unwrap());
    }

    assert_eq!(app.search_value(), "jq");
    assert_eq!(app.navigator.focused_index(), -1);
    assert!(app.document.focused_cards().is_empty());
}

#[test]
fn test_escape_in_search_clears_then_blurs() {
    let mut app = test_app();
    app.handle_key(char_key('/')).unwrap();
    app.handle_key(char_key('a')).unwrap();

    app.handle_key(key_event(KeyCode::Esc)).unwrap();
    assert_eq!(app.search_value(), "");
    assert!(app.document.search_focused());

    app.handle_key(key_event(KeyCode::Esc)).unwrap();
    assert!(!app.document.search_focused());
}

// ============================================================================
// Help Text
// ============================================================================

#[test]
fn test_help_text_lists_navigation_and_app_keys() {
    let text = generate_keyboard_shortcuts().join("\n");
    assert!(text.contains("Next app"));
    assert!(text.contains("Previous app"));
    assert!(text.contains("Toggle light/dark theme"));
    assert!(text.contains("Clear all filters"));
    assert!(text.contains("q, Ctrl+c"));
}

#[test]
fn test_mode_text_input() {
    assert!(Mode::Search.is_text_input());
    assert!(!Mode::Normal.is_text_input());
}
