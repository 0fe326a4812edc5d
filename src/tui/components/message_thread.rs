//! # MessageThread Component
//!
//! Scrollable scrollback of the active room.
//!
//! ## Responsibilities
//!
//! - Display messages in the order given, one `Message` per record
//! - Keep the view pinned to the newest message until the user scrolls up
//! - Cache message heights so only new or resized content is re-measured
//!
//! ## Architecture
//!
//! `MessageThread` is a transient component (created each frame) that wraps
//! `&'a mut MessageThreadState` (persistent state) and `&'a [Message]` (props).

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Message as ChatMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Scroll and layout state for the thread.
/// Must be persisted in the parent state across frames.
pub struct MessageThreadState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// True when newer messages sit below the visible area
    pub has_unseen_content: bool,
}

impl Default for MessageThreadState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageThreadState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            has_unseen_content: false,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Forget everything (used when switching rooms).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Scrollable thread component.
/// Created fresh each frame with references to state and data.
pub struct MessageThread<'a> {
    pub state: &'a mut MessageThreadState,
    pub messages: &'a [ChatMessage],
}

impl<'a> MessageThread<'a> {
    pub fn new(state: &'a mut MessageThreadState, messages: &'a [ChatMessage]) -> Self {
        Self { state, messages }
    }
}

impl Component for MessageThread<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.viewport_height = area.height;

        if self.messages.is_empty() {
            self.state.layout.clear();
            self.state.has_unseen_content = false;
            let hint = Paragraph::new("no messages yet")
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                );
            frame.render_widget(hint, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(self.messages.len(), content_width);

        let total_height = self.state.layout.total_height();

        // 2. Pin to the bottom before picking what is visible, else clamp
        if self.state.stick_to_bottom {
            let x = self.state.scroll_state.offset().x;
            self.state.scroll_state.set_offset(Position {
                x,
                y: self.state.max_offset(),
            });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(&self.messages[i]), rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        let current_offset = self.state.scroll_state.offset().y;
        self.state.has_unseen_content =
            !self.state.stick_to_bottom && current_offset < self.state.max_offset();
    }
}

/// Implemented on the state: `MessageThread` is rebuilt every frame and
/// cannot hold scroll position itself.
impl EventHandler for MessageThreadState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid.
    ///
    /// Messages never change once delivered, so the cache only goes stale when
    /// the width changes or the history shrinks (room switch).
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Indices of messages overlapping the viewport, padded by half a screen.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, remote_message};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut MessageThreadState, messages: &[ChatMessage], w: u16, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                MessageThread::new(state, messages).render(f, area);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 5];
        cache.update_metadata(5, 80);

        // Same everything → all reusable
        assert_eq!(cache.reusable_count(5, 80), 5);
        // New message → the existing 5 are reusable
        assert_eq!(cache.reusable_count(6, 80), 5);
        // Width changed → nothing reusable
        assert_eq!(cache.reusable_count(5, 40), 0);
        // History shrank → nothing reusable
        assert_eq!(cache.reusable_count(2, 80), 0);
    }

    #[test]
    fn test_visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 20];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.total_height(), 60);

        // Top of the content, viewport 10 rows (+5 buffer)
        let range = cache.visible_range(0, 10);
        assert_eq!(range.start, 0);
        assert!(range.end >= 5);

        // Scrolled to the end
        let range = cache.visible_range(50, 10);
        assert_eq!(range.end, 20);
    }

    #[test]
    fn empty_thread_shows_hint() {
        let mut state = MessageThreadState::new();
        let text = draw(&mut state, &[], 40, 5);
        assert!(text.contains("no messages yet"));
        assert_eq!(state.layout.total_height(), 0);
    }

    #[test]
    fn messages_render_in_given_order() {
        let messages = vec![
            remote_message("1", "ann", "first-body"),
            remote_message("2", "bob", "second-body"),
        ];
        let mut state = MessageThreadState::new();
        let text = draw(&mut state, &messages, 40, 10);

        let first = text.find("first-body").expect("first message rendered");
        let second = text.find("second-body").expect("second message rendered");
        assert!(first < second);
    }

    #[test]
    fn long_history_sticks_to_bottom() {
        let messages: Vec<ChatMessage> = (0..20)
            .map(|i| remote_message(&i.to_string(), "ann", &format!("msg-{i:02}")))
            .collect();
        let mut state = MessageThreadState::new();
        let text = draw(&mut state, &messages, 40, 9);

        assert!(text.contains("msg-19"));
        assert!(!text.contains("msg-00"));
        assert!(!state.has_unseen_content);
    }

    #[test]
    fn scrolling_up_unpins_and_flags_unseen() {
        let messages: Vec<ChatMessage> = (0..20)
            .map(|i| remote_message(&i.to_string(), "ann", &format!("msg-{i:02}")))
            .collect();
        let mut state = MessageThreadState::new();
        draw(&mut state, &messages, 40, 9);

        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);
        draw(&mut state, &messages, 40, 9);
        assert!(state.has_unseen_content);

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn reset_returns_to_pinned_state() {
        let mut state = MessageThreadState::new();
        state.stick_to_bottom = false;
        state.layout.heights = vec![3];
        state.reset();
        assert!(state.stick_to_bottom);
        assert!(state.layout.heights.is_empty());
    }
}
