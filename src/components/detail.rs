use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tui_dispatch::EventKind;
use tui_dispatch_components::{StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle};

use super::Component;
use crate::action::Action;
use crate::state::{AppState, EntryDetail};

pub struct DetailViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Full record view for a single entry.
#[derive(Default)]
pub struct DetailView;

impl Component<Action> for DetailView {
    type Props<'a> = DetailViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                    Some(Action::DetailBack)
                }
                KeyCode::Char('f') => Some(Action::FavoriteToggle),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DetailViewProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Record
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let state = props.state;
        if state.detail.is_loading() {
            let id = state.detail_id.unwrap_or_default();
            let line = format!("loading entry #{id} {}", state.spinner_frame());
            frame.render_widget(Paragraph::new(line), chunks[0]);
        } else if state.detail.is_failed() {
            render_not_found(frame, chunks[0], state);
        } else if let Some(detail) = state.detail.data() {
            let is_favorite = state.favorites.contains(&detail.id);
            render_record(frame, chunks[0], detail, is_favorite);
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("esc", "back"),
                    StatusBarHint::new("f", "favorite"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_not_found(frame: &mut Frame, area: Rect, state: &AppState) {
    let id = state.detail_id.unwrap_or_default();
    let lines = vec![
        Line::styled(
            format!("entry #{id} not found"),
            Style::default().fg(Color::Red),
        ),
        Line::raw(
            state
                .detail
                .error()
                .map(|error| error.to_string())
                .unwrap_or_default(),
        ),
        Line::raw(""),
        Line::styled("press esc to go back", Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_record(frame: &mut Frame, area: Rect, detail: &EntryDetail, is_favorite: bool) {
    let mut lines = Vec::new();

    let mut title = vec![
        Span::styled(
            format!("#{:>4} ", detail.id),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            detail.name.to_uppercase(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if is_favorite {
        title.push(Span::styled(" \u{2665}", Style::default().fg(Color::Magenta)));
    }
    lines.push(Line::from(title));
    lines.push(Line::raw(""));

    lines.push(Line::raw(format!(
        "height {}  weight {}",
        detail.height, detail.weight
    )));
    lines.push(Line::raw(format!("types: {}", detail.types.join(", "))));
    lines.push(Line::raw(""));

    for stat in &detail.stats {
        let bar = "\u{2588}".repeat((stat.value / 10).min(25) as usize);
        lines.push(Line::from(vec![
            Span::raw(format!("{:<16} {:>3} ", stat.name, stat.value)),
            Span::styled(bar, Style::default().fg(Color::Green)),
        ]));
    }

    if let Some(flavor) = detail.flavor_text.as_deref() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            flavor.to_string(),
            Style::default().fg(Color::Gray),
        ));
    }

    if let Some(sprite) = detail.sprite.as_deref() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("sprite: {sprite}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
