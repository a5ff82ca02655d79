//! Tests for reading `apps.json` and reloading it into a running app.

mod test_utils;

use bluefin_releases::data::{load_catalog, Catalog, PackageType};
use bluefin_releases::tui::{App, Message};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use test_utils::{catalog_of, char_key, sample_catalog, sample_catalog_json, test_config, RecordingOpener};

fn write_catalog(dir: &TempDir, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("apps.json");
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_sample_catalog() {
    let catalog = sample_catalog();

    assert_eq!(catalog.metadata.schema_version, "1.0");
    assert_eq!(catalog.metadata.stats.apps_total, 3);
    assert_eq!(catalog.metadata.stats.apps_with_github_repo, 1);
    assert_eq!(catalog.apps.len(), 3);

    let maps = &catalog.apps[0];
    assert_eq!(maps.developer_name.as_deref(), Some("The GNOME Project"));
    assert_eq!(maps.categories, vec!["Utility", "Maps"]);
    assert_eq!(maps.package_type, Some(PackageType::Flatpak));
    assert!(maps.is_verified);
    assert!(maps.has_github_repo());
    assert_eq!(maps.releases[1].kind, "appstream");
    assert_eq!(maps.releases[1].url, None);

    let bluefin = &catalog.apps[2];
    assert_eq!(bluefin.package_type, Some(PackageType::Os));
    assert!(!bluefin.is_verified);
    assert!(bluefin.releases.is_empty());
}

#[test]
fn test_missing_sections_default() {
    let catalog = Catalog::from_json("{}").unwrap();
    assert!(catalog.apps.is_empty());
    assert_eq!(catalog.metadata.generated_at, "");
}

#[test]
fn test_invalid_json_is_an_error() {
    let err = Catalog::from_json("{ not json").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse catalog JSON"));
}

#[test]
fn test_links_in_card_order() {
    let catalog = sample_catalog();

    assert_eq!(
        catalog.apps[0].links(),
        vec![
            "https://flathub.org/apps/org.gnome.Maps",
            "https://github.com/GNOME/gnome-maps",
            "https://github.com/GNOME/gnome-maps/releases/tag/v46.1",
        ]
    );
    assert_eq!(
        catalog.apps[1].links(),
        vec!["https://formulae.brew.sh/formula/bat"]
    );
    assert!(catalog.apps[2].links().is_empty());
}

#[test]
fn test_summary_counts() {
    let summary = sample_catalog().summary();
    assert_eq!(
        summary,
        json!({
            "apps_total": 3,
            "flatpak_count": 1,
            "homebrew_count": 1,
            "os_count": 1,
            "apps_with_github": 1,
            "apps_with_changelog": 1,
            "total_releases": 2,
            "generated_at": "2024-05-01T12:00:00Z",
        })
    );
}

// ============================================================================
// Loading From Disk
// ============================================================================

#[test]
fn test_load_catalog_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog_json());

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.app_names(), vec!["Maps", "bat", "Bluefin"]);
}

#[test]
fn test_load_missing_file_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");

    let err = load_catalog(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.json"));
}

// ============================================================================
// Reload
// ============================================================================

fn app_for(path: std::path::PathBuf) -> App {
    let catalog = load_catalog(&path).unwrap();
    let mut app = App::with_handlers(
        test_config(),
        catalog,
        Box::new(RecordingOpener::default()),
        None,
    );
    app.attach_data_path(path, false);
    app
}

#[test]
fn test_reload_picks_up_new_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog_json());
    let mut app = app_for(path.clone());

    let bigger = serde_json::to_value(catalog_of(5)).unwrap();
    fs::write(&path, bigger.to_string()).unwrap();
    app.update(Message::Reload).unwrap();

    assert!(!app.is_loading);
    assert_eq!(app.error_message, None);
    assert_eq!(app.catalog.apps.len(), 5);
    assert_eq!(app.document.visible_items().len(), 5);
    assert_eq!(app.navigator.state().items.len(), 5);
    assert_eq!(app.filters.as_ref().unwrap().stats.total, 5);
}

#[test]
fn test_reload_keeps_page_chrome_and_filters() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog_json());
    let mut app = app_for(path);

    app.update(Message::ToggleVerified).unwrap();
    app.handle_key(char_key('/')).unwrap();
    app.handle_key(char_key('m')).unwrap();
    app.update(Message::Reload).unwrap();

    assert_eq!(app.search_value(), "m");
    assert!(app.document.search_focused());
    assert!(app.filters.as_ref().unwrap().state.verified);
    assert_eq!(app.document.visible_items().len(), 1);
}

#[test]
fn test_reload_drops_stale_category_selection() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog_json());
    let mut app = app_for(path.clone());

    app.update(Message::CycleCategory).unwrap();
    assert_eq!(
        app.filters.as_ref().unwrap().state.category.as_deref(),
        Some("Development")
    );

    fs::write(&path, serde_json::to_string(&catalog_of(2)).unwrap()).unwrap();
    app.update(Message::Reload).unwrap();

    let filters = app.filters.as_ref().unwrap();
    assert_eq!(filters.state.category, None);
    assert!(filters.categories.is_empty());
    assert_eq!(app.document.visible_items().len(), 2);
}

#[test]
fn test_failed_reload_keeps_old_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog_json());
    let mut app = app_for(path.clone());

    fs::write(&path, "{ broken").unwrap();
    app.update(Message::Reload).unwrap();

    assert_eq!(app.catalog.apps.len(), 3);
    let error = app.error_message.as_deref().unwrap();
    assert!(error.starts_with("Reload failed:"));
}

#[test]
fn test_reload_without_data_path() {
    let mut app = App::with_handlers(
        test_config(),
        sample_catalog(),
        Box::new(RecordingOpener::default()),
        None,
    );
    app.update(Message::Reload).unwrap();
    assert_eq!(app.error_message.as_deref(), Some("No catalog file to reload"));
}
