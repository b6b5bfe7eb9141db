use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use tui_dispatch::EventKind;
use tui_dispatch_components::{StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle};

use super::Component;
use crate::action::Action;
use crate::state::AppState;

/// Props for GridView - read-only view of state
pub struct GridViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The paginated, searchable entry list.
#[derive(Default)]
pub struct GridView {
    list_state: ListState,
}

impl GridView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for GridView {
    type Props<'a> = GridViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectionMove(-1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectionMove(1)),
            KeyCode::PageUp => Some(Action::SelectionMove(-10)),
            KeyCode::PageDown => Some(Action::SelectionMove(10)),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::SelectionJumpTop),
            KeyCode::Char('G') | KeyCode::End => Some(Action::SelectionJumpBottom),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::PagePrev),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::PageNext),
            KeyCode::Char('/') => Some(Action::SearchStart),
            KeyCode::Char('f') => Some(Action::FavoriteToggle),
            KeyCode::Char('o') => Some(Action::FavoritesOnlyToggle),
            KeyCode::Char('r') => Some(Action::PageSet(props.state.page_number)),
            KeyCode::Enter => props
                .state
                .selected_entry()
                .map(|entry| Action::DetailOpen(entry.id)),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: GridViewProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Filter line
            Constraint::Min(1),    // Entry list
            Constraint::Length(1), // Banner (errors / warnings)
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let state = props.state;
        render_header(frame, chunks[0], state);
        render_filter_line(frame, chunks[1], state);
        self.render_entries(frame, chunks[2], state);
        render_banner(frame, chunks[3], state);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("\u{2190}\u{2192}", "page"),
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("f", "favorite"),
                    StatusBarHint::new("o", "favorites only"),
                    StatusBarHint::new("enter", "open"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

impl GridView {
    fn render_entries(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if state.page.is_loading() {
            let line = format!("loading catalog {}", state.spinner_frame());
            frame.render_widget(Paragraph::new(line), area);
            return;
        }
        if let Some(error) = state.page.error() {
            let lines = vec![
                Line::styled(
                    format!("could not load the catalog: {error}"),
                    Style::default().fg(Color::Red),
                ),
                Line::raw("press r to retry"),
            ];
            frame.render_widget(Paragraph::new(lines), area);
            return;
        }

        let view = state.filtered_view();
        if view.is_empty() {
            frame.render_widget(Paragraph::new("no matching entries"), area);
            self.list_state.select(None);
            return;
        }

        let items: Vec<ListItem> = view
            .iter()
            .map(|(entry, is_favorite)| {
                let mut spans = vec![
                    Span::styled(format!("#{:>4} ", entry.id), Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.name.clone()),
                ];
                if *is_favorite {
                    spans.push(Span::styled(
                        " \u{2665}",
                        Style::default().fg(Color::Magenta),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        self.list_state.select(Some(state.selected.min(view.len() - 1)));
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let pages = state
        .total_pages()
        .map(|total| format!("page {}/{}", state.page_number, total))
        .unwrap_or_else(|| format!("page {}", state.page_number));
    let count = state
        .page
        .data()
        .map(|page| format!("  {} entries", page.total_count))
        .unwrap_or_default();
    let spinner = if state.is_busy() {
        format!("  {}", state.spinner_frame())
    } else {
        String::new()
    };

    let line = Line::from(vec![
        Span::styled(
            "pokegrid  ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(pages),
        Span::styled(count, Style::default().fg(Color::DarkGray)),
        Span::raw(spinner),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_filter_line(frame: &mut Frame, area: Rect, state: &AppState) {
    // the live input is overlaid here while search is active
    if state.search.active {
        return;
    }

    let mut spans = Vec::new();
    if !state.search.query.is_empty() {
        spans.push(Span::styled("filter: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(state.search.query.clone()));
    }
    if state.favorites_only {
        spans.push(Span::styled(
            "  [favorites only]",
            Style::default().fg(Color::Magenta),
        ));
    }
    if !spans.is_empty() {
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn render_banner(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(error) = state.page_error.as_deref() {
        let line = Line::styled(
            format!("\u{26a0} {error} - press r to retry"),
            Style::default().fg(Color::Red),
        );
        frame.render_widget(Paragraph::new(line), area);
    } else if let Some(message) = state.message.as_deref() {
        let line = Line::styled(
            format!("\u{26a0} {message}"),
            Style::default().fg(Color::Yellow),
        );
        frame.render_widget(Paragraph::new(line), area);
    }
}
