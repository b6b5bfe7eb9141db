use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle};

use super::Component;
use crate::action::Action;

pub struct LandingProps {
    pub is_focused: bool,
}

/// The start screen shown before the grid.
#[derive(Default)]
pub struct Landing;

impl Component<Action> for Landing {
    type Props<'a> = LandingProps;

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
                KeyCode::Enter | KeyCode::Char('s') => Some(Action::BrowseStart),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: LandingProps) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Banner
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let banner = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(2),
        ])
        .split(chunks[0])[1];

        let lines = vec![
            Line::styled(
                "POKEGRID",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw("a PokeAPI catalog browser"),
            Line::raw(""),
            Line::styled("press enter to start", Style::default().fg(Color::Gray)),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), banner);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "start"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
