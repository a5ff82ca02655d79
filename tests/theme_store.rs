//! Tests for the persisted theme preference and the theme toggle key.

mod test_utils;

use bluefin_releases::config::ThemePreference;
use bluefin_releases::theme::{initial_theme, toggle_handler, Theme, ThemeStore};
use bluefin_releases::tui::App;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;
use test_utils::{char_key, sample_catalog, test_config, RecordingOpener};

// ============================================================================
// Store
// ============================================================================

#[test]
fn test_missing_store_has_no_theme() {
    let dir = TempDir::new().unwrap();
    let store = ThemeStore::new(dir.path().join("theme.json"));
    assert_eq!(store.load(), None);
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let store = ThemeStore::new(dir.path().join("nested").join("theme.json"));

    store.save(Theme::Light).unwrap();
    assert_eq!(store.load(), Some(Theme::Light));

    store.save(Theme::Dark).unwrap();
    assert_eq!(store.load(), Some(Theme::Dark));
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        r#"{"theme":"dark"}"#
    );
}

#[test]
fn test_corrupt_store_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("theme.json");
    fs::write(&path, "not json").unwrap();
    assert_eq!(ThemeStore::new(path).load(), None);
}

// ============================================================================
// Initial Theme
// ============================================================================

#[test]
fn test_stored_theme_wins_over_config() {
    assert_eq!(
        initial_theme(Some(Theme::Light), ThemePreference::Dark),
        Theme::Light
    );
}

#[test]
fn test_config_preference_without_stored_theme() {
    assert_eq!(initial_theme(None, ThemePreference::Light), Theme::Light);
    assert_eq!(initial_theme(None, ThemePreference::Dark), Theme::Dark);
}

// ============================================================================
// Toggle Key
// ============================================================================

#[test]
fn test_t_toggles_persists_and_announces() {
    let dir = TempDir::new().unwrap();
    let store = ThemeStore::new(dir.path().join("theme.json"));
    let mut app = App::with_handlers(
        test_config(),
        sample_catalog(),
        Box::new(RecordingOpener::default()),
        Some(toggle_handler(store.clone())),
    );
    assert_eq!(app.document.theme, Theme::Dark);

    app.handle_key(char_key('t')).unwrap();
    assert_eq!(app.document.theme, Theme::Light);
    assert_eq!(app.document.announcement(), Some("Switched to light mode"));
    assert_eq!(store.load(), Some(Theme::Light));

    app.handle_key(char_key('t')).unwrap();
    assert_eq!(app.document.theme, Theme::Dark);
    assert_eq!(app.document.announcement(), Some("Switched to dark mode"));
    assert_eq!(store.load(), Some(Theme::Dark));
}
