//! Pokegrid - a PokeAPI catalog browser TUI

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokegrid::action::Action;
use pokegrid::api;
use pokegrid::components::{
    Component, DetailView, DetailViewProps, GridView, GridViewProps, Landing, LandingProps,
    SearchBar, SearchBarProps,
};
use pokegrid::effect::Effect;
use pokegrid::favorites::{FavoritesStore, FileStore};
use pokegrid::reducer::reducer;
use pokegrid::state::{AppState, SPINNER_TICK_MS, Screen};

/// Pokegrid - browse the PokeAPI catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "pokegrid")]
#[command(about = "A paginated, searchable PokeAPI catalog browser")]
struct Args {
    /// Where the favorite set is persisted (defaults to the user data dir)
    #[arg(long)]
    favorites_path: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum GridComponentId {
    Landing,
    Grid,
    Detail,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum GridContext {
    Landing,
    Grid,
    Detail,
    Search,
}

impl EventRoutingState<GridComponentId, GridContext> for AppState {
    fn focused(&self) -> Option<GridComponentId> {
        if self.search.active && self.screen == Screen::Grid {
            return Some(GridComponentId::Search);
        }
        match self.screen {
            Screen::Landing => Some(GridComponentId::Landing),
            Screen::Grid => Some(GridComponentId::Grid),
            Screen::Detail => Some(GridComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<GridComponentId> {
        if self.search.active && self.screen == Screen::Grid {
            Some(GridComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: GridComponentId) -> GridContext {
        match id {
            GridComponentId::Landing => GridContext::Landing,
            GridComponentId::Grid => GridContext::Grid,
            GridComponentId::Detail => GridContext::Detail,
            GridComponentId::Search => GridContext::Search,
        }
    }

    fn default_context(&self) -> GridContext {
        GridContext::Grid
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        favorites_path,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let store: Arc<dyn FavoritesStore> = Arc::new(FileStore::new(
        favorites_path.unwrap_or_else(FileStore::default_path),
    ));

    // The favorite set is loaded once at startup; a corrupt file is not fatal
    let startup_store = Arc::clone(&store);
    let state = debug
        .load_state_or_else_async(move || async move {
            let favorites = match startup_store.load() {
                Ok(ids) => ids,
                Err(err) => {
                    eprintln!("Warning: {err}; starting with an empty favorite set");
                    HashSet::new()
                }
            };
            Ok::<AppState, io::Error>(AppState::new(favorites))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let effect_store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, effect_store, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct GridUi {
    landing: Landing,
    grid: GridView,
    detail: DetailView,
    search: SearchBar,
}

impl GridUi {
    fn new() -> Self {
        Self {
            landing: Landing,
            grid: GridView::new(),
            detail: DetailView,
            search: SearchBar,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<GridComponentId>,
    ) {
        match state.screen {
            Screen::Landing => {
                event_ctx.set_component_area(GridComponentId::Landing, area);
                self.landing.render(
                    frame,
                    area,
                    LandingProps {
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
            Screen::Grid => {
                event_ctx.set_component_area(GridComponentId::Grid, area);
                self.grid.render(
                    frame,
                    area,
                    GridViewProps {
                        state,
                        is_focused: render_ctx.is_focused() && !state.search.active,
                    },
                );
                if state.search.active && area.height > 2 {
                    // the grid leaves its filter line blank while searching
                    let input_area = Rect {
                        x: area.x,
                        y: area.y + 1,
                        width: area.width,
                        height: 1,
                    };
                    event_ctx.set_component_area(GridComponentId::Search, input_area);
                    self.search.render(
                        frame,
                        input_area,
                        SearchBarProps {
                            query: &state.search.query,
                            is_focused: render_ctx.is_focused(),
                        },
                    );
                } else {
                    event_ctx.component_areas.remove(&GridComponentId::Search);
                }
            }
            Screen::Detail => {
                event_ctx.set_component_area(GridComponentId::Detail, area);
                self.detail.render(
                    frame,
                    area,
                    DetailViewProps {
                        state,
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
        }
    }

    fn handle_landing_event(
        &mut self,
        event: &EventKind,
        _state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .landing
            .handle_event(event, LandingProps { is_focused: true })
            .into_iter()
            .collect();
        respond(actions)
    }

    fn handle_grid_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .grid
            .handle_event(
                event,
                GridViewProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        respond(actions)
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .detail
            .handle_event(
                event,
                DetailViewProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        respond(actions)
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .search
            .handle_event(
                event,
                SearchBarProps {
                    query: &state.search.query,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn respond(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    favorites: Arc<dyn FavoritesStore>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(GridUi::new()));
    let mut bus: EventBus<AppState, Action, GridComponentId, GridContext> = EventBus::new();
    let keybindings: Keybindings<GridContext> = Keybindings::new();

    let ui_landing = Rc::clone(&ui);
    bus.register(GridComponentId::Landing, move |event, state| {
        ui_landing
            .borrow_mut()
            .handle_landing_event(&event.kind, state)
    });

    let ui_grid = Rc::clone(&ui);
    bus.register(GridComponentId::Grid, move |event, state| {
        ui_grid.borrow_mut().handle_grid_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(GridComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(GridComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &favorites),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, favorites: &Arc<dyn FavoritesStore>) {
    match effect {
        Effect::FetchPage { page, seq } => {
            // one logical page fetch at a time: a newer spawn with the same
            // key replaces the older task, and the reducer drops stale seqs
            ctx.tasks().spawn("page", async move {
                match api::fetch_page(page).await {
                    Ok(page) => Action::PageDidLoad { page, seq },
                    Err(err) => Action::PageDidError {
                        error: err.to_string(),
                        seq,
                    },
                }
            });
        }
        Effect::FetchDetail { id, seq } => {
            ctx.tasks().spawn("detail", async move {
                match api::fetch_detail(id).await {
                    Ok(detail) => Action::DetailDidLoad { detail, seq },
                    Err(err) => Action::DetailDidError {
                        error: err.to_string(),
                        seq,
                    },
                }
            });
        }
        Effect::SaveFavorites { ids } => {
            let store = Arc::clone(favorites);
            ctx.tasks().spawn("favorites", async move {
                match tokio::task::spawn_blocking(move || store.save(&ids)).await {
                    Ok(Ok(())) => Action::FavoritesDidSave,
                    Ok(Err(error)) => Action::FavoritesSaveDidError(error),
                    Err(error) => Action::FavoritesSaveDidError(error.to_string()),
                }
            });
        }
    }
}
