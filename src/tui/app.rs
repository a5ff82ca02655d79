use crate::config::Config;
use crate::data::filters::{
    calculate_stats, card_matches_filters, cycle_option, FilterState, FilterStats, DATE_RANGES,
};
use crate::data::watcher::CatalogWatcher;
use crate::data::{load_catalog, Catalog, PackageType};
use crate::nav::{Document, KeyOutcome, LinkOpener, Navigator, PageElements, SystemOpener, ThemeToggle};
use crate::tui::keybindings;
use crate::tui::search::{scroll_to_app, SearchState};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::KeyEvent;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Result from a background catalog reload
pub enum ReloadResult {
    Loaded(Catalog),
    Error(String),
}

/// Filter bar controls and the counts shown next to them
#[derive(Debug, Clone, Default)]
pub struct FilterControls {
    pub state: FilterState,
    /// Category options, sorted
    pub categories: Vec<String>,
    /// App set options, sorted
    pub app_sets: Vec<String>,
    pub stats: FilterStats,
}

impl FilterControls {
    /// Attach to the document's filter bar. Returns `None` (and logs) if the
    /// page has no filter bar.
    pub fn init(doc: &Document, catalog: &Catalog) -> Option<Self> {
        if !doc.filter_bar {
            tracing::error!("filter bar not found, filters disabled");
            return None;
        }

        let mut controls = Self::default();
        controls.update_options(catalog);
        tracing::info!(
            categories = controls.categories.len(),
            app_sets = controls.app_sets.len(),
            "filters initialized"
        );
        Some(controls)
    }

    /// Rebuild selector options from the catalog, dropping selections that no
    /// longer exist.
    pub fn update_options(&mut self, catalog: &Catalog) {
        let categories: BTreeSet<&str> = catalog
            .apps
            .iter()
            .flat_map(|a| a.categories.iter().map(String::as_str))
            .filter(|c| !c.is_empty())
            .collect();
        self.categories = categories.into_iter().map(str::to_string).collect();

        let app_sets: BTreeSet<&str> = catalog
            .apps
            .iter()
            .filter_map(|a| a.app_set.as_deref())
            .filter(|s| !s.is_empty())
            .collect();
        self.app_sets = app_sets.into_iter().map(str::to_string).collect();

        if let Some(c) = &self.state.category {
            if !self.categories.contains(c) {
                self.state.category = None;
            }
        }
        if let Some(s) = &self.state.app_set {
            if !self.app_sets.contains(s) {
                self.state.app_set = None;
            }
        }
    }
}

pub struct App {
    pub config: Arc<Config>,
    pub catalog: Catalog,
    pub document: Document,
    pub navigator: Navigator,
    pub search: Option<SearchState>,
    pub filters: Option<FilterControls>,

    // UI state
    pub error_message: Option<String>,
    pub is_loading: bool,

    /// Catalog file; reload and watching are disabled without it
    pub data_path: Option<PathBuf>,
    /// Search index: app names in catalog order
    app_names: Vec<String>,
    /// Channel receiver for background reload results
    reload_rx: Option<mpsc::Receiver<ReloadResult>>,
    watcher: Option<CatalogWatcher>,
}

impl App {
    /// App with the system link opener and no theme switching
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self::with_handlers(config, catalog, Box::new(SystemOpener), None)
    }

    pub fn with_handlers(
        config: Config,
        catalog: Catalog,
        opener: Box<dyn LinkOpener>,
        theme_toggle: Option<ThemeToggle>,
    ) -> Self {
        let elements = PageElements::from(&config.ui);
        let document = Document::from_apps(&catalog.apps, elements);
        let navigator = Navigator::new(document.visible_items(), opener, theme_toggle);
        let search = SearchState::init(&document, &config.search, catalog.apps.len());
        let filters = FilterControls::init(&document, &catalog);
        let app_names = catalog.app_names();

        let mut app = Self {
            config: Arc::new(config),
            catalog,
            document,
            navigator,
            search,
            filters,
            error_message: None,
            is_loading: false,
            data_path: None,
            app_names,
            reload_rx: None,
            watcher: None,
        };
        app.apply_filters();
        app
    }

    /// Set the catalog file used by reload, optionally watching it for changes.
    pub fn attach_data_path(&mut self, path: PathBuf, watch: bool) {
        if watch {
            match CatalogWatcher::new(&path) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => tracing::warn!("Failed to watch {}: {:#}", path.display(), e),
            }
        }
        self.data_path = Some(path);
    }

    /// Route a key: the navigator first, then the app-level bindings.
    ///
    /// Returns `Ok(true)` if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.navigator.handle_key(&key, &mut self.document) == KeyOutcome::Handled {
            return Ok(false);
        }
        let msg = keybindings::dispatch(self, key);
        self.update(msg)
    }

    /// Process a message and update app state (Elm Architecture update function).
    ///
    /// Returns `Ok(true)` if the app should quit, `Ok(false)` to continue.
    pub fn update(&mut self, msg: super::Message) -> Result<bool> {
        use super::Message;
        match msg {
            // ─────────────────────────────────────────────────────────────────
            // App lifecycle
            // ─────────────────────────────────────────────────────────────────
            Message::Quit => return Ok(true),
            Message::Reload => self.start_background_reload(),

            // ─────────────────────────────────────────────────────────────────
            // Filters
            // ─────────────────────────────────────────────────────────────────
            Message::ToggleVerified => self.change_filters(|f| f.state.toggle_verified()),
            Message::ToggleUnverified => self.change_filters(|f| f.state.toggle_unverified()),
            Message::CyclePackageType => self.change_filters(|f| {
                f.state.package_type = cycle_option(&f.state.package_type, &PackageType::ALL);
            }),
            Message::CycleCategory => self.change_filters(|f| {
                f.state.category = cycle_option(&f.state.category, &f.categories);
            }),
            Message::CycleAppSet => self.change_filters(|f| {
                f.state.app_set = cycle_option(&f.state.app_set, &f.app_sets);
            }),
            Message::CycleDateRange => self.change_filters(|f| {
                f.state.days = cycle_option(&f.state.days, &DATE_RANGES);
            }),
            Message::ClearAllFilters => self.change_filters(|f| f.state.clear()),

            // ─────────────────────────────────────────────────────────────────
            // Search input
            // ─────────────────────────────────────────────────────────────────
            Message::SearchInput(c) => {
                if let Some(input) = self.document.search_input.as_mut() {
                    input.insert(c);
                }
                self.search_edited();
            }
            Message::SearchBackspace => {
                if let Some(input) = self.document.search_input.as_mut() {
                    input.backspace();
                }
                self.search_edited();
            }
            Message::SearchEscape => self.search_escape(),
            Message::SearchConfirm => self.confirm_search(),
            Message::SearchNextResult => {
                if let Some(search) = self.search.as_mut() {
                    search.select_next();
                }
            }
            Message::SearchPrevResult => {
                if let Some(search) = self.search.as_mut() {
                    search.select_prev();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // No-op
            // ─────────────────────────────────────────────────────────────────
            Message::None => {}
        }
        Ok(false)
    }

    /// Called from the event loop on every tick.
    pub fn on_tick(&mut self, now: Instant) {
        self.document.step_scroll();
        self.run_due_search(now);
        self.poll_reload();

        let changed = self.watcher.as_ref().map(|w| w.poll()).unwrap_or(false);
        if changed {
            tracing::info!("catalog changed on disk, reloading");
            self.start_background_reload();
        }
    }

    /// Terminal resized: rows available for the document.
    pub fn resize(&mut self, rows: u16) {
        self.document.set_viewport_height(i64::from(rows));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────

    fn change_filters(&mut self, change: impl FnOnce(&mut FilterControls)) {
        let Some(filters) = self.filters.as_mut() else {
            return;
        };
        change(filters);
        self.apply_filters();
    }

    /// Show the cards matching the filter controls, re-layout, and hand the
    /// new item list to the navigator.
    pub fn apply_filters(&mut self) {
        let now = Utc::now();
        let state = self.filters.as_ref().map(|f| f.state.clone());

        for card in &mut self.document.cards {
            card.visible = match &state {
                Some(state) => card_matches_filters(&card.app, state, now),
                None => true,
            };
        }
        self.document.layout();

        let stats = calculate_stats(
            self.document.cards.len(),
            self.document.cards.iter().filter(|c| c.visible).map(|c| &c.app),
        );
        if let Some(filters) = self.filters.as_mut() {
            filters.stats = stats;
        }
        tracing::info!(
            visible = stats.visible,
            total = stats.total,
            flatpak = stats.flatpak,
            homebrew = stats.homebrew,
            os = stats.os,
            "filters applied"
        );

        let items = self.document.visible_items();
        self.navigator.refresh(items, &mut self.document);
    }

    pub fn filter_stats(&self) -> FilterStats {
        match &self.filters {
            Some(f) => f.stats,
            None => calculate_stats(
                self.document.cards.len(),
                self.document.cards.iter().filter(|c| c.visible).map(|c| &c.app),
            ),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn search_value(&self) -> &str {
        self.document
            .search_input
            .as_ref()
            .map(|i| i.value.as_str())
            .unwrap_or("")
    }

    fn search_edited(&mut self) {
        let value = self.search_value().to_string();
        if let Some(search) = self.search.as_mut() {
            search.on_input(&value, Instant::now());
        }
    }

    pub fn run_due_search(&mut self, now: Instant) {
        let value = self.search_value().to_string();
        if let Some(search) = self.search.as_mut() {
            search.run_due(&value, &self.app_names, now);
        }
    }

    fn search_escape(&mut self) {
        let has_text = !self.search_value().trim().is_empty();
        let results_visible = self
            .search
            .as_ref()
            .map(|s| s.results_visible)
            .unwrap_or(false);

        if has_text || results_visible {
            if let Some(input) = self.document.search_input.as_mut() {
                input.clear();
            }
            if let Some(search) = self.search.as_mut() {
                search.clear();
            }
        } else {
            self.document.blur_search();
        }
    }

    fn confirm_search(&mut self) {
        let value = self.search_value().trim().to_string();
        let Some(search) = self.search.as_mut() else {
            return;
        };

        // Enter before the debounce fired
        if search.is_pending() {
            search.perform_search(&value, &self.app_names);
        }

        let Some(result) = search.selected_result().cloned() else {
            return;
        };
        search.hide();
        scroll_to_app(&mut self.document, &result.app_name);
        self.document.blur_search();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reload
    // ─────────────────────────────────────────────────────────────────────────

    /// Reload the catalog on a blocking task (non-blocking for the UI).
    /// Without a tokio runtime the reload runs inline.
    pub fn start_background_reload(&mut self) {
        // Don't start another reload if one is already in progress
        if self.reload_rx.is_some() {
            return;
        }

        let Some(path) = self.data_path.clone() else {
            self.error_message = Some("No catalog file to reload".to_string());
            return;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            let result = load_catalog(&path);
            self.finish_reload(result.map_err(|e| format!("{:#}", e)));
            return;
        };

        self.is_loading = true;
        let (tx, rx) = mpsc::channel(1);
        self.reload_rx = Some(rx);

        handle.spawn_blocking(move || {
            let result = match load_catalog(&path) {
                Ok(catalog) => ReloadResult::Loaded(catalog),
                Err(e) => ReloadResult::Error(format!("{:#}", e)),
            };
            let _ = tx.blocking_send(result);
        });
    }

    /// Poll for reload results (non-blocking, call from event loop tick)
    pub fn poll_reload(&mut self) -> bool {
        let Some(mut rx) = self.reload_rx.take() else {
            return false;
        };

        match rx.try_recv() {
            Ok(ReloadResult::Loaded(catalog)) => {
                self.finish_reload(Ok(catalog));
                true
            }
            Ok(ReloadResult::Error(msg)) => {
                self.finish_reload(Err(msg));
                true
            }
            Err(mpsc::error::TryRecvError::Empty) => {
                self.reload_rx = Some(rx);
                false
            }
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.finish_reload(Err("reload task ended without a result".to_string()));
                true
            }
        }
    }

    fn finish_reload(&mut self, result: std::result::Result<Catalog, String>) {
        self.is_loading = false;
        match result {
            Ok(catalog) => {
                self.replace_catalog(catalog);
                self.error_message = None;
            }
            Err(msg) => {
                tracing::error!("Failed to reload catalog: {}", msg);
                self.error_message = Some(format!("Reload failed: {}", msg));
            }
        }
    }

    /// Swap in a new catalog, keeping the page chrome (search text, theme,
    /// scroll position, live region) as it was.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        let old = &self.document;
        let mut document = Document::from_apps(&catalog.apps, PageElements::from(&self.config.ui));
        document.theme = old.theme;
        document.search_input = old.search_input.clone();
        document.help_modal = old.help_modal.clone();
        document.live_region = old.live_region.clone();
        document.scroll = old.scroll;
        document.set_viewport_height(old.viewport_height);

        self.document = document;
        self.app_names = catalog.app_names();
        if let Some(filters) = self.filters.as_mut() {
            filters.update_options(&catalog);
        }
        tracing::info!("catalog reloaded with {} apps", catalog.apps.len());
        self.catalog = catalog;

        self.apply_filters();
    }
}
