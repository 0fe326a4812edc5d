//! # Invitation Component
//!
//! A single bordered line showing the link others can use to join the room.
//! Purely presentational: the link is computed by the caller.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::Component;

/// Rows taken by the component: one line of text plus top and bottom borders.
pub const INVITATION_HEIGHT: u16 = 3;

pub struct Invitation<'a> {
    pub invitation_link: &'a str,
}

impl<'a> Invitation<'a> {
    pub fn new(invitation_link: &'a str) -> Self {
        Self { invitation_link }
    }
}

impl Component for Invitation<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = Style::default().fg(Color::Magenta).add_modifier(Modifier::DIM);
        let block = Block::bordered()
            .title("invite")
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(1));

        let line = Line::from(vec![
            Span::styled("share ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.invitation_link,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]);

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
