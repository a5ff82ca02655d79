use crate::nav::PageElements;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Reload when the catalog file changes on disk
    #[serde(default = "default_true")]
    pub watch: bool,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("apps.json")
}

fn default_true() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            watch: true,
        }
    }
}

/// Theme used when no preference has been stored yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default = "default_true")]
    pub search_bar: bool,
    #[serde(default = "default_true")]
    pub filter_bar: bool,
    #[serde(default = "default_true")]
    pub live_region: bool,
    #[serde(default = "default_true")]
    pub help_modal: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Auto,
            search_bar: true,
            filter_bar: true,
            live_region: true,
            help_modal: true,
        }
    }
}

impl From<&UiConfig> for PageElements {
    fn from(ui: &UiConfig) -> Self {
        PageElements {
            search_bar: ui.search_bar,
            filter_bar: ui.filter_bar,
            live_region: ui.live_region,
            help_modal: ui.help_modal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_chars() -> usize {
    1
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_chars: default_min_chars(),
        }
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "bluefin-releases")
        .context("Could not determine config directory")
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Directory for the theme preference and the log file
pub fn state_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    Ok(dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .to_path_buf())
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn theme_path() -> Result<PathBuf> {
    Ok(state_dir()?.join("theme.json"))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(state_dir()?.join("bluefin-releases.log"))
}

/// Load the config. An explicit path must exist; the default path is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = default_config_path()?;
            if !p.exists() {
                tracing::debug!("no config at {}, using defaults", p.display());
                return Ok(Config::default());
            }
            p
        }
    };

    parse_file(&path)
}

fn parse_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    Ok(config)
}

/// Write the default config, refusing to clobber an existing file.
pub fn init(path: Option<&Path>) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if config_path.exists() {
        anyhow::bail!("Config already exists at {}", config_path.display());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(&Config::default())?;
    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(config_path)
}
