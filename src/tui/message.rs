//! Message enum for Elm Architecture (TEA) pattern.
//!
//! App-level actions are represented as messages. Card navigation is handled
//! by the navigator before a key ever becomes a message.

/// All app-level user actions.
///
/// Messages are dispatched from key events and processed by `App::update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────────────────────
    // App lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Quit the application
    Quit,
    /// Reload the catalog from disk
    Reload,

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle "verified only"
    ToggleVerified,
    /// Toggle "unverified only"
    ToggleUnverified,
    /// Cycle the package type selector
    CyclePackageType,
    /// Cycle the category selector
    CycleCategory,
    /// Cycle the app set selector
    CycleAppSet,
    /// Cycle the "updated within" selector
    CycleDateRange,
    /// Reset every filter control
    ClearAllFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // Search input
    // ─────────────────────────────────────────────────────────────────────────
    /// Add a character to the search query
    SearchInput(char),
    /// Remove last character from the search query
    SearchBackspace,
    /// Clear the query, or leave the input if already clear
    SearchEscape,
    /// Jump to the selected result
    SearchConfirm,
    /// Select the next result in the dropdown
    SearchNextResult,
    /// Select the previous result in the dropdown
    SearchPrevResult,

    // ─────────────────────────────────────────────────────────────────────────
    // No-op
    // ─────────────────────────────────────────────────────────────────────────
    /// No operation (for unhandled keys)
    None,
}
