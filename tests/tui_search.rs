//! Tests for the header search: matching, debouncing and jumping to a card.

mod test_utils;

use bluefin_releases::tui::search::{filter_apps, fuzzy_match, result_count_label};
use bluefin_releases::tui::{App, Message};
use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use test_utils::{catalog_of, char_key, key_event, sample_catalog, test_config, RecordingOpener};

fn app_with(catalog: bluefin_releases::data::Catalog) -> App {
    App::with_handlers(
        test_config(),
        catalog,
        Box::new(RecordingOpener::default()),
        None,
    )
}

fn type_query(app: &mut App, query: &str) {
    app.handle_key(char_key('/')).unwrap();
    for c in query.chars() {
        app.handle_key(char_key(c)).unwrap();
    }
}

fn after_debounce() -> Instant {
    Instant::now() + Duration::from_millis(400)
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_substring_match_ignores_case() {
    assert!(fuzzy_match("GNOME Maps", "maps"));
    assert!(fuzzy_match("bat", "BA"));
    assert!(!fuzzy_match("bat", "cat"));
}

#[test]
fn test_results_sorted_by_name() {
    let names: Vec<String> = ["Maps", "bat", "Bluefin"].iter().map(|s| s.to_string()).collect();
    let results = filter_apps(&names, "a");
    let got: Vec<&str> = results.iter().map(|r| r.app_name.as_str()).collect();
    assert_eq!(got, vec!["bat", "Maps"]);
}

#[test]
fn test_count_label() {
    assert_eq!(result_count_label(0), "0 apps");
    assert_eq!(result_count_label(1), "1 app");
    assert_eq!(result_count_label(12), "12 apps");
}

// ============================================================================
// Debounce
// ============================================================================

#[test]
fn test_search_waits_for_debounce() {
    let mut app = app_with(sample_catalog());
    type_query(&mut app, "ma");

    let search = app.search.as_ref().unwrap();
    assert!(search.is_pending());
    assert!(!search.results_visible);

    app.run_due_search(Instant::now());
    assert!(!app.search.as_ref().unwrap().results_visible);

    app.run_due_search(after_debounce());
    let search = app.search.as_ref().unwrap();
    assert!(search.results_visible);
    assert_eq!(search.last_query, "ma");
    assert_eq!(search.results.len(), 1);
    assert_eq!(search.results[0].app_name, "Maps");
}

#[test]
fn test_clearing_input_hides_results() {
    let mut app = app_with(sample_catalog());
    type_query(&mut app, "b");
    app.run_due_search(after_debounce());
    assert!(app.search.as_ref().unwrap().results_visible);

    app.handle_key(key_event(KeyCode::Backspace)).unwrap();
    let search = app.search.as_ref().unwrap();
    assert!(!search.results_visible);
    assert!(!search.is_pending());
}

#[test]
fn test_no_matches_still_shows_dropdown() {
    let mut app = app_with(sample_catalog());
    type_query(&mut app, "zzz");
    app.run_due_search(after_debounce());

    let search = app.search.as_ref().unwrap();
    assert!(search.results_visible);
    assert!(search.results.is_empty());
    assert!(search.selected_result().is_none());
}

// ============================================================================
// Selecting a Result
// ============================================================================

#[test]
fn test_enter_scrolls_to_card_and_blurs() {
    let mut app = app_with(catalog_of(20));
    type_query(&mut app, "App 7");
    app.run_due_search(after_debounce());

    app.handle_key(key_event(KeyCode::Enter)).unwrap();

    let card_top = app.document.cards[7].top;
    assert_eq!(
        app.document.scroll.target,
        Some(card_top - app.document.header_height)
    );
    assert!(!app.search.as_ref().unwrap().results_visible);
    assert!(!app.document.search_focused());
}

#[test]
fn test_enter_before_debounce_searches_immediately() {
    let mut app = app_with(catalog_of(20));
    type_query(&mut app, "App 12");
    assert!(app.search.as_ref().unwrap().is_pending());

    app.update(Message::SearchConfirm).unwrap();

    let card_top = app.document.cards[12].top;
    assert_eq!(
        app.document.scroll.target,
        Some(card_top - app.document.header_height)
    );
}

#[test]
fn test_arrow_keys_move_selection() {
    let mut app = app_with(sample_catalog());
    type_query(&mut app, "a");
    app.run_due_search(after_debounce());

    app.handle_key(key_event(KeyCode::Down)).unwrap();
    assert_eq!(app.search.as_ref().unwrap().selected, 1);
    app.handle_key(key_event(KeyCode::Down)).unwrap();
    assert_eq!(app.search.as_ref().unwrap().selected, 1);
    app.handle_key(key_event(KeyCode::Up)).unwrap();
    app.handle_key(key_event(KeyCode::Up)).unwrap();
    assert_eq!(app.search.as_ref().unwrap().selected, 0);
    assert_eq!(
        app.search.as_ref().unwrap().selected_result().unwrap().app_name,
        "bat"
    );
}

#[test]
fn test_selecting_filtered_out_app_does_not_scroll() {
    let mut app = app_with(sample_catalog());
    app.update(Message::ToggleVerified).unwrap();
    type_query(&mut app, "bat");
    app.run_due_search(after_debounce());

    app.handle_key(key_event(KeyCode::Enter)).unwrap();
    assert_eq!(app.document.scroll.target, None);
}

#[test]
fn test_without_search_bar_search_is_disabled() {
    let mut config = test_config();
    config.ui.search_bar = false;
    let mut app = App::with_handlers(
        config,
        sample_catalog(),
        Box::new(RecordingOpener::default()),
        None,
    );

    assert!(app.search.is_none());
    app.handle_key(char_key('/')).unwrap();
    assert!(!app.document.search_focused());
    assert_eq!(app.search_value(), "");
}
