//! App-name search for the header search bar.
//!
//! Matching is a plain case-insensitive substring test. The search box
//! debounces input: each edit pushes the deadline out, and the event loop
//! runs the query once the deadline passes.

use crate::config::SearchConfig;
use crate::nav::Document;
use std::time::{Duration, Instant};

/// Case-insensitive substring match
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(&query.to_lowercase())
}

/// A matching app name and where the query starts within it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub app_name: String,
    /// Char index in `app_name` where the match starts
    pub match_index: usize,
}

/// Char index in `name` where a case-insensitive match of `query_lower` starts.
fn match_position(name: &str, query_lower: &str) -> Option<usize> {
    name.char_indices()
        .position(|(i, _)| name[i..].to_lowercase().starts_with(query_lower))
}

/// All names containing `query`, sorted by name ignoring case.
pub fn filter_apps(apps: &[String], query: &str) -> Vec<SearchResult> {
    if query.is_empty() {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    let mut results: Vec<SearchResult> = apps
        .iter()
        .filter_map(|name| {
            match_position(name, &query_lower).map(|match_index| SearchResult {
                app_name: name.clone(),
                match_index,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        a.app_name
            .to_lowercase()
            .cmp(&b.app_name.to_lowercase())
            .then_with(|| a.app_name.cmp(&b.app_name))
    });
    results
}

/// Count label shown above the dropdown
pub fn result_count_label(count: usize) -> String {
    match count {
        1 => "1 app".to_string(),
        n => format!("{} apps", n),
    }
}

pub fn no_results_message(query: &str) -> String {
    format!("No apps found matching \"{}\"", query)
}

/// State of the search dropdown attached to the document's search input
#[derive(Debug, Clone)]
pub struct SearchState {
    pub results: Vec<SearchResult>,
    pub results_visible: bool,
    pub selected: usize,
    /// Query the current results were computed for
    pub last_query: String,
    debounce: Duration,
    min_chars: usize,
    deadline: Option<Instant>,
}

impl SearchState {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            results: Vec::new(),
            results_visible: false,
            selected: 0,
            last_query: String::new(),
            debounce: Duration::from_millis(config.debounce_ms),
            min_chars: config.min_chars,
            deadline: None,
        }
    }

    /// Attach to the document's search input. Returns `None` (and logs) if
    /// the page has no search bar.
    pub fn init(doc: &Document, config: &SearchConfig, app_count: usize) -> Option<Self> {
        if doc.search_input.is_none() {
            tracing::error!("search input not found, search disabled");
            return None;
        }
        tracing::info!("search initialized with {} apps", app_count);
        Some(Self::new(config))
    }

    /// The input changed. Short queries hide the dropdown right away;
    /// anything else runs after the debounce delay.
    pub fn on_input(&mut self, value: &str, now: Instant) {
        let query = value.trim();
        if query.chars().count() >= self.min_chars {
            self.deadline = Some(now + self.debounce);
        } else {
            self.deadline = None;
            self.hide();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Run the pending search if its deadline has passed. Returns true if it ran.
    pub fn run_due(&mut self, value: &str, apps: &[String], now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.perform_search(value.trim(), apps);
                true
            }
            _ => false,
        }
    }

    pub fn perform_search(&mut self, query: &str, apps: &[String]) {
        if query.chars().count() < self.min_chars {
            self.hide();
            return;
        }

        self.results = filter_apps(apps, query);
        self.results_visible = true;
        self.selected = 0;
        self.last_query = query.to_string();
        tracing::debug!("found {} apps matching {:?}", self.results.len(), query);
    }

    pub fn hide(&mut self) {
        self.results_visible = false;
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.results_visible = false;
        self.selected = 0;
        self.last_query.clear();
        self.deadline = None;
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1).min(self.results.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        if self.results_visible {
            self.results.get(self.selected)
        } else {
            None
        }
    }
}

/// Scroll the first shown card titled `app_name` to the top of the content
/// area. Returns false if no such card is shown.
pub fn scroll_to_app(doc: &mut Document, app_name: &str) -> bool {
    let target = doc
        .cards
        .iter()
        .find(|c| c.visible && c.title.as_deref().map(str::trim) == Some(app_name))
        .map(|c| c.top);

    match target {
        Some(top) => {
            let y = top - doc.header_height;
            doc.scroll_to(y);
            tracing::info!("scrolled to app: {}", app_name);
            true
        }
        None => {
            tracing::warn!("app not found: {}", app_name);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fuzzy_match_ignores_case() {
        assert!(fuzzy_match("GNOME Maps", "maps"));
        assert!(fuzzy_match("firefox", "FIRE"));
        assert!(!fuzzy_match("firefox", "chrome"));
    }

    #[test]
    fn test_filter_apps_sorted_by_name() {
        let apps = names(&["zed", "Blender", "bat", "Zellij"]);
        let results = filter_apps(&apps, "b");
        let got: Vec<&str> = results.iter().map(|r| r.app_name.as_str()).collect();
        assert_eq!(got, vec!["bat", "Blender"]);
        assert_eq!(results[0].match_index, 0);
    }

    #[test]
    fn test_match_index_counts_chars_of_original_name() {
        let results = filter_apps(&names(&["İstanbul Transit", "Café Menu"]), "stan");
        assert_eq!(results[0].match_index, 1);

        let results = filter_apps(&names(&["Café Menu"]), "menu");
        assert_eq!(results[0].match_index, 5);
        let start: String = results[0].app_name.chars().skip(5).collect();
        assert_eq!(start, "Menu");
    }

    #[test]
    fn test_filter_apps_empty_query() {
        assert!(filter_apps(&names(&["a"]), "").is_empty());
    }

    #[test]
    fn test_debounce_runs_after_deadline() {
        let mut state = SearchState::new(&SearchConfig::default());
        let apps = names(&["Firefox", "Files"]);
        let start = Instant::now();

        state.on_input("fi", start);
        assert!(!state.run_due("fi", &apps, start + Duration::from_millis(100)));
        assert!(state.run_due("fi", &apps, start + Duration::from_millis(300)));
        assert_eq!(state.results.len(), 2);
        assert!(state.results_visible);
    }

    #[test]
    fn test_count_label() {
        assert_eq!(result_count_label(0), "0 apps");
        assert_eq!(result_count_label(1), "1 app");
        assert_eq!(result_count_label(4), "4 apps");
    }
}
