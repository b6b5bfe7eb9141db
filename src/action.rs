//! Actions - every event that can change state

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{CatalogPage, EntryDetail};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// One-time entry point, dispatched by the shell: kicks off the
    /// implicit first page load
    Init,

    /// Leave the landing screen for the grid
    BrowseStart,

    // ===== Page category =====
    /// Request a page by number; out-of-range numbers clamp, no error
    PageSet(u32),
    PageNext,
    PagePrev,

    /// Result: a page arrived for request `seq`
    PageDidLoad { page: CatalogPage, seq: u64 },

    /// Result: the fetch for request `seq` failed
    PageDidError { error: String, seq: u64 },

    // ===== Selection category =====
    SelectionMove(i16),
    SelectionJumpTop,
    SelectionJumpBottom,

    // ===== Search category (pure in-memory, no remote calls) =====
    SearchStart,
    SearchInput(char),
    SearchBackspace,
    SearchCancel,
    SearchSubmit,

    // ===== Favorites category =====
    /// Flip the selected entry's membership and write the set through
    FavoriteToggle,
    FavoritesOnlyToggle,
    FavoritesDidSave,
    /// Non-fatal: the in-memory toggle stands, the write did not
    FavoritesSaveDidError(String),

    // ===== Detail category =====
    DetailOpen(u32),
    DetailDidLoad { detail: EntryDetail, seq: u64 },
    DetailDidError { error: String, seq: u64 },
    DetailBack,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
