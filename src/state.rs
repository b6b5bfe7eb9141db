//! Application state - single source of truth

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Entries per page, fixed by the remote listing contract.
pub const PAGE_SIZE: u32 = 30;

/// Spinner cadence while a fetch is in flight.
pub const SPINNER_TICK_MS: u64 = 120;
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// One row of the remote catalog listing.
///
/// The id is derived at fetch time (see [`crate::api::resolve_entry_id`])
/// and never changes for the lifetime of the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub url: String,
}

/// A fixed-size slice of the catalog, addressed by 1-based page number.
/// Replaced wholesale on every page change - pages are never merged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogPage {
    pub entries: Vec<CatalogEntry>,
    pub total_count: u32,
    pub page_number: u32,
}

impl CatalogPage {
    pub fn total_pages(&self) -> u32 {
        self.total_count.div_ceil(PAGE_SIZE)
    }
}

/// One base stat of an entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EntryStat {
    pub name: String,
    pub value: u16,
}

/// Full record for a single entry, fetched on demand and discarded when
/// navigation leaves the detail view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EntryDetail {
    pub id: u32,
    pub name: String,
    pub height: u16,
    pub weight: u16,
    pub stats: Vec<EntryStat>,
    pub types: Vec<String>,
    pub sprite: Option<String>,
    pub flavor_text: Option<String>,
}

/// Which view the shell is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Screen {
    #[default]
    Landing,
    Grid,
    Detail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Which screen is on display
    #[debug(section = "Shell", label = "Screen", debug_fmt)]
    pub screen: Screen,

    /// Last successfully loaded page. `Loading` only before the first page
    /// ever arrives; later failures go to `page_error` and the previous
    /// page stays on screen.
    #[debug(section = "Catalog", label = "Page", debug_fmt)]
    pub page: DataResource<CatalogPage>,

    /// Requested 1-based page number, clamped to `[1, total_pages]` once a
    /// page has loaded
    #[debug(section = "Catalog", label = "Page number")]
    pub page_number: u32,

    /// Whether a page request is in flight
    #[debug(section = "Catalog", label = "Fetching")]
    pub page_fetching: bool,

    /// Error of the most recent failed page fetch while a page is retained
    #[debug(section = "Catalog", label = "Error", debug_fmt)]
    pub page_error: Option<String>,

    /// Sequence number of the newest page request; completions carrying an
    /// older number are discarded (last-request-wins)
    #[debug(skip)]
    pub page_seq: u64,

    /// Client-side name filter
    #[debug(section = "Filters", label = "Search", debug_fmt)]
    pub search: SearchState,

    /// Restrict the view to favorited entries
    #[debug(section = "Filters", label = "Favorites only")]
    pub favorites_only: bool,

    /// Favorited entry ids, write-through persisted on every toggle
    #[debug(section = "Filters", label = "Favorites", debug_fmt)]
    pub favorites: HashSet<u32>,

    /// Cursor into the filtered view
    #[debug(section = "Filters", label = "Selected")]
    pub selected: usize,

    /// Detail record lifecycle: Empty -> Loading -> Loaded/Failed
    #[debug(section = "Detail", label = "Detail", debug_fmt)]
    pub detail: DataResource<EntryDetail>,

    /// Id the detail view was opened for
    #[debug(section = "Detail", label = "Id", debug_fmt)]
    pub detail_id: Option<u32>,

    #[debug(skip)]
    pub detail_seq: u64,

    /// Non-fatal warnings (e.g. a favorites write that did not stick)
    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,

    /// Spinner phase counter, advanced only while something is loading
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create state with a favorite set loaded from the store at startup.
    pub fn new(favorites: HashSet<u32>) -> Self {
        Self {
            screen: Screen::Landing,
            page: DataResource::Empty,
            page_number: 1,
            page_fetching: false,
            page_error: None,
            page_seq: 0,
            search: SearchState::default(),
            favorites_only: false,
            favorites,
            selected: 0,
            detail: DataResource::Empty,
            detail_id: None,
            detail_seq: 0,
            message: None,
            tick_count: 0,
        }
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.page.data().map(CatalogPage::total_pages)
    }

    /// Clamps a requested page to `[1, total_pages]`. Before the first page
    /// arrives only the lower bound is known.
    pub fn clamp_page(&self, requested: u32) -> u32 {
        let requested = requested.max(1);
        match self.total_pages() {
            Some(total) => requested.min(total.max(1)),
            None => requested,
        }
    }

    /// The load error surfaced to the user, if any.
    pub fn load_error(&self) -> Option<&str> {
        self.page_error.as_deref().or_else(|| self.page.error())
    }

    /// The filtered, favorite-annotated view of the current page: a pure
    /// function of (entries, query, favorites_only, favorites). Preserves
    /// page order and never mutates.
    pub fn filtered_view(&self) -> Vec<(&CatalogEntry, bool)> {
        let Some(page) = self.page.data() else {
            return Vec::new();
        };
        let query = self.search.query.trim().to_lowercase();
        page.entries
            .iter()
            .filter(|entry| query.is_empty() || entry.name.to_lowercase().contains(&query))
            .map(|entry| (entry, self.favorites.contains(&entry.id)))
            .filter(|(_, is_favorite)| !self.favorites_only || *is_favorite)
            .collect()
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.filtered_view()
            .get(self.selected)
            .map(|(entry, _)| *entry)
    }

    /// Reset the cursor when the filtered view shrank underneath it.
    pub fn clamp_selection(&mut self) {
        let len = self.filtered_view().len();
        if self.selected >= len {
            self.selected = 0;
        }
    }

    /// Move the cursor by `delta` within the filtered view. Returns whether
    /// the cursor actually moved.
    pub fn move_selection(&mut self, delta: i16) -> bool {
        let len = self.filtered_view().len();
        if len == 0 {
            self.selected = 0;
            return false;
        }
        let current = self.selected.min(len - 1);
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (current + delta as usize).min(len - 1)
        };
        if next != self.selected {
            self.selected = next;
            true
        } else {
            false
        }
    }

    pub fn is_busy(&self) -> bool {
        self.page_fetching || self.page.is_loading() || self.detail.is_loading()
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(HashSet::new())
    }
}
