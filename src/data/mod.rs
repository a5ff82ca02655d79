pub mod filters;
pub mod watcher;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level structure of `apps.json` as written by the release pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub apps: Vec<AppEntry>,
}

/// Build metadata and statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub schema_version: String,
    pub generated_at: String,
    pub generated_by: String,
    pub build_duration: String,
    pub stats: Stats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub apps_total: usize,
    #[serde(rename = "appsWithGitHubRepo")]
    pub apps_with_github_repo: usize,
    pub apps_with_changelogs: usize,
    pub total_releases: usize,
}

/// A single package in the listing (Flathub app, Homebrew formula, or OS image)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub developer_name: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Last update, as emitted upstream (RFC 3339 or plain date)
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, rename = "currentReleaseVersion")]
    pub version: Option<String>,
    #[serde(default, rename = "currentReleaseDate")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub flathub_url: Option<String>,
    #[serde(default)]
    pub source_repo: Option<SourceRepo>,
    #[serde(default)]
    pub releases: Vec<Release>,
    #[serde(default)]
    pub installs_last_month: Option<u64>,
    #[serde(default)]
    pub favorites_count: Option<u64>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub package_type: Option<PackageType>,
    #[serde(default)]
    pub app_set: Option<String>,
}

/// Source repository of a package
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRepo {
    /// "github", "gitlab", "other"
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
}

/// A release/changelog entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Release {
    pub version: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// "github-release", "appstream"
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Flatpak,
    Homebrew,
    Os,
}

impl PackageType {
    pub const ALL: [PackageType; 3] = [PackageType::Flatpak, PackageType::Homebrew, PackageType::Os];

    /// Display label, matching the upstream site's wording
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flatpak => "Flathub",
            Self::Homebrew => "Homebrew",
            Self::Os => "OS",
        }
    }
}

impl AppEntry {
    /// Outbound links in the order they appear on the card.
    pub fn links(&self) -> Vec<String> {
        let mut links = Vec::new();
        if let Some(url) = &self.flathub_url {
            links.push(url.clone());
        }
        if self.package_type == Some(PackageType::Homebrew) && !self.id.is_empty() {
            links.push(format!("https://formulae.brew.sh/formula/{}", self.id));
        }
        if let Some(repo) = &self.source_repo {
            links.push(repo.url.clone());
        }
        links.extend(self.releases.iter().filter_map(|r| r.url.clone()));
        links.retain(|l| !l.trim().is_empty());
        links
    }

    pub fn has_github_repo(&self) -> bool {
        self.source_repo
            .as_ref()
            .map(|r| r.kind == "github")
            .unwrap_or(false)
    }
}

impl Catalog {
    /// Parse a catalog from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse catalog JSON")
    }

    /// All app names, in catalog order (the search index)
    pub fn app_names(&self) -> Vec<String> {
        self.apps.iter().map(|a| a.name.clone()).collect()
    }

    /// Summary in the shape the pipeline prints for CI.
    pub fn summary(&self) -> serde_json::Value {
        let count = |t: PackageType| {
            self.apps
                .iter()
                .filter(|a| a.package_type == Some(t))
                .count()
        };
        let with_changelog = self.apps.iter().filter(|a| !a.releases.is_empty()).count();
        let total_releases: usize = self.apps.iter().map(|a| a.releases.len()).sum();

        serde_json::json!({
            "apps_total": self.apps.len(),
            "flatpak_count": count(PackageType::Flatpak),
            "homebrew_count": count(PackageType::Homebrew),
            "os_count": count(PackageType::Os),
            "apps_with_github": self.apps.iter().filter(|a| a.has_github_repo()).count(),
            "apps_with_changelog": with_changelog,
            "total_releases": total_releases,
            "generated_at": self.metadata.generated_at,
        })
    }
}

/// Load the catalog from disk
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog from {}", path.display()))?;

    let catalog = Catalog::from_json(&content)
        .with_context(|| format!("Failed to parse catalog from {}", path.display()))?;

    tracing::info!(apps = catalog.apps.len(), "loaded catalog from {}", path.display());
    Ok(catalog)
}
