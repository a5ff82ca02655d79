//! Light/dark theme: palette, persisted preference, and the toggle handler
//! handed to the navigator.

use crate::config::ThemePreference;
use crate::nav::{Document, ThemeToggle};
use anyhow::{Context, Result};
use fs2::FileExt;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Colors used by the renderer
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub focus: Color,
    pub border: Color,
    pub tag: Color,
    pub verified: Color,
    pub error: Color,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Live-region text after switching to this theme
    pub fn announcement(self) -> String {
        format!("Switched to {} mode", self.name())
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                fg: Color::White,
                bg: Color::Reset,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                focus: Color::Yellow,
                border: Color::Gray,
                tag: Color::Magenta,
                verified: Color::Green,
                error: Color::Red,
            },
            Theme::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::Gray,
                accent: Color::Blue,
                focus: Color::Rgb(200, 90, 0),
                border: Color::DarkGray,
                tag: Color::Magenta,
                verified: Color::Rgb(0, 120, 0),
                error: Color::Red,
            },
        }
    }
}

/// Theme from the terminal's `COLORFGBG` ("fg;bg"), if it says anything.
pub fn system_theme() -> Option<Theme> {
    let value = std::env::var("COLORFGBG").ok()?;
    theme_from_colorfgbg(&value)
}

pub fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    // ANSI 7 (light gray) and 9-15 (bright colors) are light backgrounds
    Some(if bg == 7 || bg >= 9 {
        Theme::Light
    } else {
        Theme::Dark
    })
}

/// Initial theme: stored preference, then config, then terminal, then dark.
pub fn initial_theme(stored: Option<Theme>, preference: ThemePreference) -> Theme {
    if let Some(theme) = stored {
        return theme;
    }
    match preference {
        ThemePreference::Light => Theme::Light,
        ThemePreference::Dark => Theme::Dark,
        ThemePreference::Auto => system_theme().unwrap_or_default(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTheme {
    theme: Theme,
}

/// The persisted theme preference (a small JSON file, locked while accessed)
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, or `None` if missing or unreadable.
    pub fn load(&self) -> Option<Theme> {
        match self.read() {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!("Ignoring stored theme: {:#}", e);
                None
            }
        }
    }

    fn read(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.lock_shared()?;

        let mut content = String::new();
        let read = (&file).read_to_string(&mut content);
        file.unlock()?;
        read?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredTheme = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(stored.theme))
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.lock_exclusive()?;

        let content = serde_json::to_string(&StoredTheme { theme })?;
        let written = file
            .set_len(0)
            .and_then(|_| (&file).write_all(content.as_bytes()))
            .and_then(|_| (&file).flush());
        file.unlock()?;
        written?;

        Ok(())
    }
}

/// Build the handler the navigator calls for the theme key: flip the
/// document's theme, persist it, and announce the switch.
pub fn toggle_handler(store: ThemeStore) -> ThemeToggle {
    Box::new(move |doc: &mut Document| {
        let current = doc.theme;
        let next = current.toggled();

        doc.apply_theme(next);
        if let Err(e) = store.save(next) {
            tracing::warn!("Failed to save theme preference: {:#}", e);
        }
        doc.announce(&next.announcement());

        tracing::info!("theme switched from {} to {}", current.name(), next.name());
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(theme_from_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(theme_from_colorfgbg("0;default;7"), Some(Theme::Light));
        assert_eq!(theme_from_colorfgbg("garbage"), None);
    }

    #[test]
    fn test_stored_theme_wins() {
        assert_eq!(
            initial_theme(Some(Theme::Light), ThemePreference::Dark),
            Theme::Light
        );
        assert_eq!(initial_theme(None, ThemePreference::Light), Theme::Light);
    }
}
