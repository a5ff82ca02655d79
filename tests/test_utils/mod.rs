//! Test utilities and fixtures for bluefin-releases tests

#![allow(dead_code)]

use bluefin_releases::config::Config;
use bluefin_releases::data::{AppEntry, Catalog, PackageType, Release, SourceRepo};
use bluefin_releases::nav::LinkOpener;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// A small catalog in the shape the release pipeline writes
pub fn sample_catalog_json() -> Value {
    json!({
        "metadata": {
            "schemaVersion": "1.0",
            "generatedAt": "2024-05-01T12:00:00Z",
            "generatedBy": "pipeline",
            "buildDuration": "42s",
            "stats": {
                "appsTotal": 3,
                "appsWithGitHubRepo": 1,
                "appsWithChangelogs": 1,
                "totalReleases": 2
            }
        },
        "apps": [
            {
                "id": "org.gnome.Maps",
                "name": "Maps",
                "summary": "Find places around the world",
                "developerName": "The GNOME Project",
                "categories": ["Utility", "Maps"],
                "updatedAt": "2024-04-28T08:00:00Z",
                "currentReleaseVersion": "46.1",
                "flathubUrl": "https://flathub.org/apps/org.gnome.Maps",
                "sourceRepo": {
                    "type": "github",
                    "url": "https://github.com/GNOME/gnome-maps",
                    "owner": "GNOME",
                    "repo": "gnome-maps"
                },
                "releases": [
                    {
                        "version": "46.1",
                        "date": "2024-04-28",
                        "title": "Maps 46.1",
                        "url": "https://github.com/GNOME/gnome-maps/releases/tag/v46.1",
                        "type": "github-release"
                    },
                    {
                        "version": "46.0",
                        "date": "2024-03-20",
                        "title": "Maps 46.0",
                        "type": "appstream"
                    }
                ],
                "isVerified": true,
                "packageType": "flatpak",
                "appSet": "core"
            },
            {
                "id": "bat",
                "name": "bat",
                "summary": "A cat clone with wings",
                "categories": ["Development"],
                "updatedAt": "2023-01-01",
                "packageType": "homebrew",
                "appSet": "cli"
            },
            {
                "id": "bluefin",
                "name": "Bluefin",
                "summary": "The next generation Linux workstation",
                "packageType": "os"
            }
        ]
    })
}

pub fn sample_catalog() -> Catalog {
    serde_json::from_value(sample_catalog_json()).expect("sample catalog parses")
}

/// Minimal app with the fields filtering and navigation care about
pub fn make_app(name: &str, package_type: PackageType, verified: bool) -> AppEntry {
    AppEntry {
        id: name.to_lowercase(),
        name: name.to_string(),
        summary: format!("{} summary", name),
        package_type: Some(package_type),
        is_verified: verified,
        flathub_url: (package_type == PackageType::Flatpak)
            .then(|| format!("https://flathub.org/apps/{}", name)),
        ..AppEntry::default()
    }
}

pub fn make_app_with_repo(name: &str, repo_url: &str) -> AppEntry {
    AppEntry {
        source_repo: Some(SourceRepo {
            kind: "github".to_string(),
            url: repo_url.to_string(),
            owner: None,
            repo: None,
        }),
        releases: vec![Release {
            version: "1.0".to_string(),
            title: "First".to_string(),
            ..Release::default()
        }],
        ..make_app(name, PackageType::Homebrew, false)
    }
}

/// Catalog of `n` Flathub apps named "App 0".."App n-1"
pub fn catalog_of(n: usize) -> Catalog {
    Catalog {
        apps: (0..n)
            .map(|i| make_app(&format!("App {}", i), PackageType::Flatpak, i % 2 == 0))
            .collect(),
        ..Catalog::default()
    }
}

pub fn test_config() -> Config {
    Config::default()
}

/// Create a key event with no modifiers
pub fn key_event(code: KeyCode) -> KeyEvent {
    key_event_with(code, KeyModifiers::empty())
}

pub fn key_event_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

pub fn char_key(c: char) -> KeyEvent {
    key_event(KeyCode::Char(c))
}

/// Link opener that records URLs instead of launching a browser
#[derive(Clone, Default)]
pub struct RecordingOpener {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    pub fn urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) -> anyhow::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Link opener that always fails
pub struct FailingOpener;

impl LinkOpener for FailingOpener {
    fn open(&mut self, _url: &str) -> anyhow::Result<()> {
        anyhow::bail!("no browser available")
    }
}
