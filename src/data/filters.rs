//! Filtering of release cards.
//!
//! Predicates are pure and take the card's catalog entry; the TUI owns the
//! controls and re-runs [`card_matches_filters`] whenever a control changes.

use super::{AppEntry, PackageType};
use chrono::{DateTime, NaiveDate, Utc};

/// Date range options offered by the "Updated" control, in days.
pub const DATE_RANGES: [u32; 4] = [1, 7, 30, 90];

/// Current value of every filter control. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub verified: bool,
    pub unverified: bool,
    pub package_type: Option<PackageType>,
    pub category: Option<String>,
    pub app_set: Option<String>,
    pub days: Option<u32>,
}

/// Counts shown next to the filter controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub visible: usize,
    pub total: usize,
    pub flatpak: usize,
    pub homebrew: usize,
    pub os: usize,
}

pub fn matches_verification(app: &AppEntry, verified_only: bool, unverified_only: bool) -> bool {
    if !verified_only && !unverified_only {
        return true;
    }
    if verified_only && !app.is_verified {
        return false;
    }
    if unverified_only && app.is_verified {
        return false;
    }
    true
}

pub fn matches_package_type(app: &AppEntry, package_type: Option<PackageType>) -> bool {
    match package_type {
        None => true,
        Some(t) => app.package_type == Some(t),
    }
}

/// Substring match against the card's joined category list.
pub fn matches_category(app: &AppEntry, category: Option<&str>) -> bool {
    match category {
        None | Some("") => true,
        Some(c) => app.categories.join(",").contains(c),
    }
}

pub fn matches_app_set(app: &AppEntry, app_set: Option<&str>) -> bool {
    match app_set {
        None | Some("") => true,
        Some(s) => app.app_set.as_deref().unwrap_or("") == s,
    }
}

/// True when the app was updated within `days` of `now`. Apps without a
/// parseable update date never match an active range.
pub fn matches_date_range(app: &AppEntry, days: Option<u32>, now: DateTime<Utc>) -> bool {
    let Some(days) = days else {
        return true;
    };
    let Some(updated) = app.updated_at.as_deref().and_then(parse_date) else {
        return false;
    };

    let diff_days = (now - updated).num_milliseconds() as f64 / (1000.0 * 60.0 * 60.0 * 24.0);
    diff_days <= f64::from(days)
}

/// Parse an upstream timestamp: RFC 3339, or a bare `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn card_matches_filters(app: &AppEntry, state: &FilterState, now: DateTime<Utc>) -> bool {
    matches_verification(app, state.verified, state.unverified)
        && matches_package_type(app, state.package_type)
        && matches_category(app, state.category.as_deref())
        && matches_app_set(app, state.app_set.as_deref())
        && matches_date_range(app, state.days, now)
}

pub fn calculate_stats<'a>(
    total: usize,
    visible: impl IntoIterator<Item = &'a AppEntry>,
) -> FilterStats {
    let mut stats = FilterStats {
        total,
        ..FilterStats::default()
    };

    for app in visible {
        stats.visible += 1;
        match app.package_type {
            Some(PackageType::Flatpak) => stats.flatpak += 1,
            Some(PackageType::Homebrew) => stats.homebrew += 1,
            Some(PackageType::Os) => stats.os += 1,
            None => {}
        }
    }

    stats
}

/// Per-type breakdown, e.g. `(3 Flathub, 2 Homebrew)`. Empty when nothing is visible.
pub fn format_stats(stats: &FilterStats) -> String {
    let mut parts = Vec::new();
    if stats.flatpak > 0 {
        parts.push(format!("{} Flathub", stats.flatpak));
    }
    if stats.homebrew > 0 {
        parts.push(format!("{} Homebrew", stats.homebrew));
    }
    if stats.os > 0 {
        parts.push(format!("{} OS", stats.os));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("({})", parts.join(", "))
    }
}

pub fn format_count(stats: &FilterStats) -> String {
    format!("Showing {} of {} packages", stats.visible, stats.total)
}

pub fn date_range_label(days: u32) -> String {
    match days {
        1 => "Last 24 hours".to_string(),
        n => format!("Last {} days", n),
    }
}

/// Labels for the active-filter tags
pub fn active_filter_labels(state: &FilterState) -> Vec<String> {
    let mut labels = Vec::new();

    if state.verified {
        labels.push("Verified".to_string());
    }
    if state.unverified {
        labels.push("Unverified".to_string());
    }
    if let Some(t) = state.package_type {
        labels.push(format!("Type: {}", t.label()));
    }
    if let Some(c) = &state.category {
        labels.push(format!("Category: {}", c));
    }
    if let Some(s) = &state.app_set {
        labels.push(format!("App Set: {}", s));
    }
    if let Some(days) = state.days {
        labels.push(format!("Updated: {}", date_range_label(days)));
    }

    labels
}

/// Advance an "All, a, b, c" selector to its next value, wrapping back to `None`.
pub fn cycle_option<T: Clone + PartialEq>(current: &Option<T>, options: &[T]) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => {
            let pos = options.iter().position(|o| o == value);
            match pos {
                Some(i) if i + 1 < options.len() => Some(options[i + 1].clone()),
                _ => None,
            }
        }
    }
}

impl FilterState {
    /// Toggle the verified checkbox; checking it unchecks "unverified".
    pub fn toggle_verified(&mut self) {
        self.verified = !self.verified;
        if self.verified {
            self.unverified = false;
        }
    }

    /// Toggle the unverified checkbox; checking it unchecks "verified".
    pub fn toggle_unverified(&mut self) {
        self.unverified = !self.unverified;
        if self.unverified {
            self.verified = false;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_option_wraps_to_all() {
        let opts = vec!["a".to_string(), "b".to_string()];
        let first = cycle_option(&None, &opts);
        assert_eq!(first.as_deref(), Some("a"));
        let second = cycle_option(&first, &opts);
        assert_eq!(second.as_deref(), Some("b"));
        assert_eq!(cycle_option(&second, &opts), None);
    }

    #[test]
    fn test_cycle_option_empty_options_stays_all() {
        let opts: Vec<String> = Vec::new();
        assert_eq!(cycle_option(&None, &opts), None);
    }

    #[test]
    fn test_parse_date_accepts_plain_date() {
        let dt = parse_date("2024-03-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert!(parse_date("not a date").is_none());
    }
}
