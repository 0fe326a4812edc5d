//! # Landing Page Component
//!
//! Shown in place of the room view while no room is active.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct LandingPage;

impl LandingPage {
    fn lines() -> Vec<Line<'static>> {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);

        vec![
            Line::from(Span::styled(
                "No room open",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Ctrl+N", key),
                Span::raw("  open a new room"),
            ]),
            Line::from(vec![
                Span::styled("Esc", key),
                Span::raw("     quit"),
            ]),
            Line::default(),
            Line::from(Span::styled("or start with: huddle --join <invitation link>", dim)),
            Line::from(Span::styled(format!("v{}", env!("CARGO_PKG_VERSION")), dim)),
        ]
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = Self::lines();
        let [text_area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
    }
}
