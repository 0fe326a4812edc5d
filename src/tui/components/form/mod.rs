//! # Form Component
//!
//! Single-field submission form used to compose messages.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, `Ctrl+J` newlines)
//! - Handle editing (backspace, delete, left/right/home/end)
//! - Emit `FormEvent::Submit` on Enter and clear itself
//! - Show the placeholder while the buffer is empty
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. The placeholder is a prop set by
//! whoever owns the form. The form does not validate what is submitted: it only
//! refuses to submit a buffer that contains nothing but whitespace.

mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_cell,
    inner_width, layout_rows, next_char_boundary, prev_char_boundary,
};

/// High-level events emitted by the Form
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

/// Text field with placeholder.
///
/// # Props
///
/// - `placeholder`: hint shown while the buffer is empty
///
/// # State
///
/// - `buffer`: current text
/// - `cursor`: byte offset into `buffer`
/// - `scroll_offset`: first visible row once content exceeds `MAX_VISIBLE_LINES`
pub struct Form {
    pub buffer: String,
    pub placeholder: String,
    cursor: usize,
    scroll_offset: usize,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            placeholder: String::new(),
            cursor: 0,
            scroll_offset: 0,
        }
    }

    /// Required height for the current buffer, clamped to the visible line limit.
    /// Returns a value in `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = layout_rows(&self.buffer, inner_width(area_width)).len();
        rows.clamp(1, MAX_VISIBLE_LINES as usize) as u16 + VERTICAL_OVERHEAD
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Keep the cursor row inside the visible window.
    fn update_scroll_offset(&mut self, cursor_row: usize, total_rows: usize) {
        let visible = MAX_VISIBLE_LINES as usize;
        if total_rows <= visible {
            self.scroll_offset = 0;
        } else if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + visible {
            self.scroll_offset = cursor_row + 1 - visible;
        }
    }
}

impl Component for Form {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let rows = layout_rows(&self.buffer, width);
        let (cursor_row, cursor_col) = cursor_cell(&self.buffer, &rows, self.cursor);
        self.update_scroll_offset(cursor_row, rows.len());

        let block = Block::bordered()
            .title("message")
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let lines: Vec<Line> = rows
                .iter()
                .skip(self.scroll_offset)
                .take(MAX_VISIBLE_LINES as usize)
                .map(|row| Line::raw(&self.buffer[row.start..row.end]))
                .collect();
            Paragraph::new(lines).style(Style::default().fg(Color::Green))
        };

        frame.render_widget(paragraph.block(block), area);

        if rows.len() > MAX_VISIBLE_LINES as usize {
            let max_scroll = rows.len().saturating_sub(MAX_VISIBLE_LINES as usize);
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(max_scroll)
                .position(self.scroll_offset);
            let scrollbar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                scrollbar_area,
                &mut scrollbar_state,
            );
        }

        // Both are below the inner width / visible line count, so they fit in u16
        let col = cursor_col.min(usize::from(width.saturating_sub(1))) as u16;
        let row = cursor_row.saturating_sub(self.scroll_offset) as u16;
        frame.set_cursor_position((
            area.x + CONTENT_OFFSET_X + col,
            area.y + CONTENT_OFFSET_Y + row,
        ));
    }
}

impl EventHandler for Form {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut utf8));
                Some(FormEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert_str(&normalized);
                Some(FormEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                FormEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                FormEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                FormEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                FormEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    FormEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    FormEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(FormEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn draw(form: &mut Form, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                form.render(f, area);
            })
            .unwrap();
        terminal
    }

    #[test]
    fn test_handle_input() {
        let mut form = Form::new();

        assert_eq!(
            form.handle_event(&TuiEvent::InputChar('a')),
            Some(FormEvent::ContentChanged)
        );
        form.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(form.buffer, "ab");

        assert_eq!(
            form.handle_event(&TuiEvent::Backspace),
            Some(FormEvent::ContentChanged)
        );
        assert_eq!(form.buffer, "a");
    }

    #[test]
    fn test_submit_returns_text_and_clears() {
        let mut form = Form::new();
        type_str(&mut form, "hello there");

        let res = form.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(FormEvent::Submit("hello there".to_string())));
        assert!(form.buffer.is_empty(), "Buffer should be cleared after submit");

        // Cursor was reset: typing starts from the beginning again
        type_str(&mut form, "x");
        assert_eq!(form.buffer, "x");
    }

    #[test]
    fn test_submit_keeps_surrounding_whitespace() {
        let mut form = Form::new();
        type_str(&mut form, "  padded ");
        assert_eq!(
            form.handle_event(&TuiEvent::Submit),
            Some(FormEvent::Submit("  padded ".to_string()))
        );
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut form = Form::new();
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        type_str(&mut form, "  \n ");
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        assert_eq!(form.buffer, "  \n ");
    }

    #[test]
    fn test_cursor_editing_in_middle() {
        let mut form = Form::new();
        type_str(&mut form, "hllo");
        form.handle_event(&TuiEvent::CursorHome);
        form.handle_event(&TuiEvent::CursorRight);
        form.handle_event(&TuiEvent::InputChar('e'));
        assert_eq!(form.buffer, "hello");

        form.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(form.handle_event(&TuiEvent::Delete), None);
        form.handle_event(&TuiEvent::CursorLeft);
        form.handle_event(&TuiEvent::Delete);
        assert_eq!(form.buffer, "hell");
    }

    #[test]
    fn test_multibyte_backspace() {
        let mut form = Form::new();
        type_str(&mut form, "café");
        form.handle_event(&TuiEvent::Backspace);
        assert_eq!(form.buffer, "caf");
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut form = Form::new();
        form.handle_event(&TuiEvent::Paste("one\r\ntwo\rthree".into()));
        assert_eq!(form.buffer, "one\ntwo\nthree");
    }

    #[test]
    fn test_height_grows_then_caps() {
        let mut form = Form::new();
        assert_eq!(form.calculate_height(40), 1 + VERTICAL_OVERHEAD);

        form.handle_event(&TuiEvent::Paste("a\nb\nc".into()));
        assert_eq!(form.calculate_height(40), 3 + VERTICAL_OVERHEAD);

        form.handle_event(&TuiEvent::Paste("\nd\ne\nf\ng".into()));
        assert_eq!(
            form.calculate_height(40),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_huge_paste_keeps_cursor_row_in_view() {
        let mut form = Form::new();
        let text = "x\n".repeat(70_000);
        form.handle_event(&TuiEvent::Paste(text.clone()));

        let rows = layout_rows(&form.buffer, inner_width(20));
        assert!(rows.len() > usize::from(u16::MAX));
        let (cursor_row, _) = cursor_cell(&form.buffer, &rows, text.len());
        form.update_scroll_offset(cursor_row, rows.len());

        assert_eq!(form.scroll_offset, cursor_row + 1 - MAX_VISIBLE_LINES as usize);
        assert_eq!(form.calculate_height(20), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_wraps_between_words_like_messages() {
        let mut form = Form::new();
        type_str(&mut form, "hello world");
        let terminal = draw(&mut form, 12, 4);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("hello"));
        assert!(text.contains("world"));
        assert_eq!(form.calculate_height(12), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_placeholder_shown_when_empty() {
        let mut form = Form::new();
        form.placeholder = "say something".to_string();
        let terminal = draw(&mut form, 40, 3);
        assert!(buffer_text(terminal.backend().buffer()).contains("say something"));
    }

    #[test]
    fn test_placeholder_hidden_once_typing() {
        let mut form = Form::new();
        form.placeholder = "say something".to_string();
        type_str(&mut form, "hey");
        let terminal = draw(&mut form, 40, 3);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("hey"));
        assert!(!text.contains("say something"));
    }

    #[test]
    fn test_scrolls_to_keep_cursor_visible() {
        let mut form = Form::new();
        form.handle_event(&TuiEvent::Paste("1\n2\n3\n4\n5\n6\n7".into()));
        let height = form.calculate_height(20);
        let terminal = draw(&mut form, 20, height);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains('7'));
        assert!(!text.contains('1'));
    }
}
