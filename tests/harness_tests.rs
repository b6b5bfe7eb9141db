//! Tests using the new StoreTestHarness and EffectStoreTestHarness
//!
//! These tests demonstrate the integrated testing pattern where
//! store, component, and render testing are combined.

use pokegrid::{
    action::Action,
    components::{Component, GridView, GridViewProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, CatalogEntry, CatalogPage, PAGE_SIZE, Screen},
};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, NumericComponentId};

/// Helper to create a mock catalog page
fn mock_page(names: &[&str], page_number: u32, total_count: u32) -> CatalogPage {
    let entries = names
        .iter()
        .enumerate()
        .map(|(index, name)| CatalogEntry {
            id: (page_number - 1) * PAGE_SIZE + index as u32 + 1,
            name: (*name).to_string(),
            url: String::new(),
        })
        .collect();
    CatalogPage {
        entries,
        total_count,
        page_number,
    }
}

/// Helper to create state with the first page loaded
fn state_with_page() -> AppState {
    AppState {
        page: DataResource::Loaded(mock_page(&["bulbasaur", "ivysaur", "venusaur"], 1, 1302)),
        screen: Screen::Grid,
        ..Default::default()
    }
}

// ============================================================================
// EffectStoreTestHarness Tests
// ============================================================================

#[test]
fn test_page_fetch_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Trigger the initial fetch - should set loading and emit effect
    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.page.is_loading());

    // Verify effect was emitted
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchPage { page: 1, .. }));

    // Simulate async completion
    harness.complete_action(Action::PageDidLoad {
        page: mock_page(&["bulbasaur", "ivysaur"], 1, 1302),
        seq: 1,
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    harness.assert_state(|s| s.page.is_loaded());
    harness.assert_state(|s| s.total_pages() == Some(44));
}

#[test]
fn test_page_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Trigger fetch
    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.page.is_loading());

    // Simulate error on the first load: nothing to fall back to
    harness.complete_action(Action::PageDidError {
        error: "remote unavailable".into(),
        seq: 1,
    });
    harness.process_emitted();

    harness.assert_state(|s| s.page.is_failed());
    harness.assert_state(|s| s.load_error() == Some("remote unavailable"));
}

#[test]
fn test_page_error_after_load_keeps_page() {
    let mut harness = EffectStoreTestHarness::new(state_with_page(), reducer);

    // Navigate away, then fail
    harness.dispatch_collect(Action::PageNext);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::FetchPage { page: 2, .. }));

    harness.complete_action(Action::PageDidError {
        error: "remote unavailable".into(),
        seq: 1,
    });
    harness.process_emitted();

    // The previous page stays on screen next to the error
    harness.assert_state(|s| s.page.is_loaded());
    harness.assert_state(|s| s.load_error() == Some("remote unavailable"));
}

#[test]
fn test_superseded_page_response_is_dropped() {
    let mut harness = EffectStoreTestHarness::new(state_with_page(), reducer);

    // Two navigations in a row; only the latest request may land
    harness.dispatch_collect(Action::PageSet(2));
    harness.dispatch_collect(Action::PageSet(3));
    let effects = harness.drain_effects();
    effects.effects_count(2);

    // The page-2 response arrives after being superseded
    harness.complete_action(Action::PageDidLoad {
        page: mock_page(&["stale"], 2, 1302),
        seq: 1,
    });
    // The page-3 response is current
    harness.complete_action(Action::PageDidLoad {
        page: mock_page(&["fresh"], 3, 1302),
        seq: 2,
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 1, "Only the current response should apply");
    harness.assert_state(|s| s.page_number == 3);
    harness.assert_state(|s| s.page.data().map(|p| p.page_number) == Some(3));
}

#[test]
fn test_favorite_toggle_writes_through() {
    let mut harness = EffectStoreTestHarness::new(state_with_page(), reducer);

    harness.dispatch_collect(Action::FavoriteToggle);
    harness.assert_state(|s| s.favorites.contains(&1));

    // The full set is handed to the store
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::SaveFavorites { ids } if ids.len() == 1 && ids.contains(&1)),
    );

    // A failed write warns but keeps the in-memory toggle
    harness.complete_action(Action::FavoritesSaveDidError("disk full".into()));
    harness.process_emitted();
    harness.assert_state(|s| s.favorites.contains(&1));
    harness.assert_state(|s| s.message.is_some());
}

#[test]
fn test_search_emits_no_effects() {
    let mut harness = EffectStoreTestHarness::new(state_with_page(), reducer);

    harness.dispatch_collect(Action::SearchStart);
    for c in "saur".chars() {
        harness.dispatch_collect(Action::SearchInput(c));
    }
    harness.dispatch_collect(Action::SearchSubmit);

    // Filtering is in-memory; nothing goes over the wire
    let effects = harness.drain_effects();
    effects.effects_empty();
    harness.assert_state(|s| s.search.query == "saur");
    harness.assert_state(|s| s.filtered_view().len() == 3);
}

#[test]
fn test_dispatch_all() {
    let mut harness = EffectStoreTestHarness::new(state_with_page(), reducer);

    // Dispatch multiple actions at once
    let results = harness.dispatch_all([
        Action::SelectionMove(1),
        Action::SelectionMove(1),
        Action::SelectionMove(-1),
    ]);

    // All should have changed state
    assert_eq!(results, vec![true, true, true]);

    harness.assert_state(|s| s.selected == 1);
}

// ============================================================================
// Component + Store Integration Tests
// ============================================================================

#[test]
fn test_keyboard_opens_detail() {
    let mut harness = EffectStoreTestHarness::new(state_with_page(), reducer);
    let mut component = GridView::new();

    // Send enter through component, get actions
    let actions = harness.send_keys::<NumericComponentId, _, _>("enter", |state, event| {
        let props = GridViewProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::DetailOpen(1));

    // Now dispatch the action manually and verify state + effects
    harness.dispatch_collect(Action::DetailOpen(1));
    harness.assert_state(|s| s.screen == Screen::Detail);
    harness.assert_state(|s| s.detail.is_loading());

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::FetchDetail { id: 1, .. }));
}

#[test]
fn test_keyboard_favorite_toggle() {
    let mut harness = EffectStoreTestHarness::new(state_with_page(), reducer);
    let mut component = GridView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("f", |state, event| {
        let props = GridViewProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    // Dispatch the returned action
    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.favorites.contains(&1));
}

// ============================================================================
// Render Tests with Harness
// ============================================================================

#[test]
fn test_render_loading_state() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = GridView::new();

    // Trigger loading
    harness.dispatch_collect(Action::Init);

    let output = harness.render_plain(60, 20, |frame, area, state| {
        let props = GridViewProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("loading catalog"),
        "Loading indicator should be visible in output:\n{}",
        output
    );
}

#[test]
fn test_render_loaded_entries() {
    let mut harness = EffectStoreTestHarness::new(state_with_page(), reducer);
    let mut component = GridView::new();

    let output = harness.render_plain(60, 20, |frame, area, state| {
        let props = GridViewProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("bulbasaur"),
        "Entry names should be visible in output:\n{}",
        output
    );
    assert!(output.contains("page 1/44"));
}

#[test]
fn test_render_filter_narrows_list() {
    let mut harness = EffectStoreTestHarness::new(state_with_page(), reducer);
    let mut component = GridView::new();

    harness.dispatch_collect(Action::SearchStart);
    for c in "ivy".chars() {
        harness.dispatch_collect(Action::SearchInput(c));
    }
    harness.dispatch_collect(Action::SearchSubmit);

    let output = harness.render_plain(60, 20, |frame, area, state| {
        let props = GridViewProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(output.contains("ivysaur"));
    assert!(
        !output.contains("bulbasaur"),
        "Filtered-out entries should not render:\n{}",
        output
    );
}

// ============================================================================
// Effect Assertions Tests
// ============================================================================

#[test]
fn test_effect_assertions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Initially no effects
    let effects = harness.drain_effects();
    effects.effects_empty();

    // After init, exactly one page fetch
    harness.dispatch_collect(Action::Init);
    let effects = harness.drain_effects();
    effects.effects_not_empty();
    effects.effects_count(1);
    effects.effects_all_match(|e| matches!(e, Effect::FetchPage { .. }));
    effects.effects_none_match(|e| matches!(e, Effect::FetchDetail { .. }));
}

// ============================================================================
// Async Simulation Tests
// ============================================================================

#[test]
fn test_multiple_async_completions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    // Queue up multiple async completions
    harness.complete_action(Action::PageDidLoad {
        page: mock_page(&["bulbasaur"], 1, 1302),
        seq: 1,
    });
    harness.complete_action(Action::FavoritesDidSave);

    // Process all at once
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    // FavoritesDidSave with no pending warning is a no-op
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.page.is_loaded());
}
