use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message as ChatMessage, Origin};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat message with origin-based styling.
///
/// `Message` is a **transient component**: it's created fresh each frame with the
/// record it renders and holds no state of its own.
///
/// # Styling
///
/// - **Local** (green): sent from this terminal
/// - **Remote** (blue): sent by someone else in the room
/// - **System** (yellow, italic): room notices
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height with
/// `textwrap` options matching Ratatui's `Paragraph` wrapping, so the parent
/// `MessageThread` can lay out the scroll view without rendering first.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    /// Calculate the height required for this message given a width.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy one row.
            return 1;
        }

        let body = message.body.trim();
        if body.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(body, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> String {
        let time = self.message.sent_at.with_timezone(&Local).format("%H:%M");
        format!("{} · {}", self.message.author, time)
    }
}

fn origin_style(origin: Origin) -> Style {
    match origin {
        Origin::Local => Style::default().fg(Color::Green),
        Origin::Remote => Style::default().fg(Color::Blue),
        Origin::System => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = origin_style(self.message.origin);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.body.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl Component for Message<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
