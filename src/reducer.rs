//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Screen};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // The first page load is implicit on startup
        Action::Init => {
            state.page = DataResource::Loading;
            state.page_number = 1;
            state.page_fetching = true;
            state.page_seq += 1;
            DispatchResult::changed_with(Effect::FetchPage {
                page: 1,
                seq: state.page_seq,
            })
        }

        Action::BrowseStart => {
            if state.screen == Screen::Landing {
                state.screen = Screen::Grid;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Pagination =====
        Action::PageSet(page) => set_page(state, page),
        Action::PageNext => set_page(state, state.page_number.saturating_add(1)),
        Action::PagePrev => set_page(state, state.page_number.saturating_sub(1)),

        Action::PageDidLoad { page, seq } => {
            if seq != state.page_seq {
                // superseded by a newer request
                return DispatchResult::unchanged();
            }
            state.page_fetching = false;
            state.page_error = None;
            state.page_number = page.page_number.min(page.total_pages().max(1));
            state.page = DataResource::Loaded(page);
            state.selected = 0;
            DispatchResult::changed()
        }

        Action::PageDidError { error, seq } => {
            if seq != state.page_seq {
                return DispatchResult::unchanged();
            }
            state.page_fetching = false;
            if state.page.is_loaded() {
                // keep showing the previous page
                state.page_error = Some(error);
            } else {
                state.page = DataResource::Failed(error);
            }
            DispatchResult::changed()
        }

        // ===== Selection =====
        Action::SelectionMove(delta) => {
            if state.move_selection(delta) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SelectionJumpTop => {
            if state.selected != 0 {
                state.selected = 0;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SelectionJumpBottom => {
            let len = state.filtered_view().len();
            let bottom = len.saturating_sub(1);
            if len > 0 && state.selected != bottom {
                state.selected = bottom;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Search (pure in-memory, never a remote call) =====
        Action::SearchStart => {
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchInput(c) => {
            state.search.query.push(c);
            state.clamp_selection();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_some() {
                state.clamp_selection();
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SearchCancel => {
            state.search.active = false;
            state.search.query.clear();
            state.clamp_selection();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            DispatchResult::changed()
        }

        // ===== Favorites =====
        Action::FavoritesOnlyToggle => {
            state.favorites_only = !state.favorites_only;
            state.clamp_selection();
            DispatchResult::changed()
        }

        Action::FavoriteToggle => {
            let Some(id) = state.selected_entry().map(|entry| entry.id) else {
                return DispatchResult::unchanged();
            };
            if !state.favorites.remove(&id) {
                state.favorites.insert(id);
            }
            state.clamp_selection();
            // write-through: the full set goes to the store on every toggle
            DispatchResult::changed_with(Effect::SaveFavorites {
                ids: state.favorites.clone(),
            })
        }

        Action::FavoritesDidSave => {
            if state.message.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::FavoritesSaveDidError(error) => {
            // non-fatal: the in-memory toggle stands for the session
            state.message = Some(format!("favorites not saved: {error}"));
            DispatchResult::changed()
        }

        // ===== Detail =====
        Action::DetailOpen(id) => {
            state.screen = Screen::Detail;
            state.detail_id = Some(id);
            state.detail = DataResource::Loading;
            state.detail_seq += 1;
            DispatchResult::changed_with(Effect::FetchDetail {
                id,
                seq: state.detail_seq,
            })
        }

        Action::DetailDidLoad { detail, seq } => {
            if seq != state.detail_seq {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Loaded(detail);
            DispatchResult::changed()
        }

        Action::DetailDidError { error, seq } => {
            if seq != state.detail_seq {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::DetailBack => {
            state.screen = Screen::Grid;
            state.detail = DataResource::Empty;
            state.detail_id = None;
            // a late completion for the abandoned view must be dropped
            state.detail_seq += 1;
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Tick => {
            if state.is_busy() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn set_page(state: &mut AppState, requested: u32) -> DispatchResult<Effect> {
    let page = state.clamp_page(requested);
    let retry = state.load_error().is_some();
    if page == state.page_number && !retry {
        // already shown or already in flight; out-of-range requests clamp
        // back to the current page without a fetch
        return DispatchResult::unchanged();
    }
    state.page_number = page;
    state.page_error = None;
    state.page_fetching = true;
    if state.page.data().is_none() {
        state.page = DataResource::Loading;
    }
    state.page_seq += 1;
    DispatchResult::changed_with(Effect::FetchPage {
        page,
        seq: state.page_seq,
    })
}
