//! # TitleBar Component
//!
//! Top status bar showing the active room and notifications.
//!
//! ## Conditional Formatting
//!
//! 1. **Unseen content**: `"Huddle (room: 3fa9c) | Sent | ↓ New"`
//! 2. **Status message**: `"Huddle (room: 3fa9c) | Sent"`
//! 3. **Default**: `"Huddle (room: 3fa9c)"`
//!
//! Without a room the parenthesised part reads `no room`.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component.
///
/// All fields are props:
/// - `room_id`: active room, if any
/// - `status_message`: transient status (e.g. "Opened room 3fa9c")
/// - `has_unseen_content`: newer messages below the scroll position
/// - `is_sending`: at least one message is awaiting delivery
pub struct TitleBar<'a> {
    pub room_id: Option<&'a str>,
    pub status_message: &'a str,
    pub has_unseen_content: bool,
    pub is_sending: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        room_id: Option<&'a str>,
        status_message: &'a str,
        has_unseen_content: bool,
        is_sending: bool,
    ) -> Self {
        Self {
            room_id,
            status_message,
            has_unseen_content,
            is_sending,
        }
    }

    fn text(&self) -> String {
        let mut title = match self.room_id {
            Some(room_id) => format!("Huddle (room: {})", room_id),
            None => String::from("Huddle (no room)"),
        };
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(self.status_message);
        }
        if self.is_sending {
            title.push_str(" | sending…");
        }
        if self.has_unseen_content {
            title.push_str(" | ↓ New");
        }
        title
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
