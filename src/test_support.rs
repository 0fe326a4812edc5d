//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;

use chrono::{TimeZone, Utc};

use crate::core::message::{Message, Origin};
use crate::core::state::App;
use crate::tui::context::DomainContext;

pub const TEST_BASE_URL: &str = "https://huddle.test";

/// Creates a test App with no active room.
pub fn test_app() -> App {
    App::new("tester".to_string(), TEST_BASE_URL.to_string())
}

/// Creates a test App already inside `room_id`.
pub fn test_app_in_room(room_id: &str) -> App {
    let mut app = test_app();
    app.room_id = Some(room_id.to_string());
    app
}

/// Builds a remote message with a fixed timestamp.
pub fn remote_message(id: &str, author: &str, body: &str) -> Message {
    Message {
        id: id.to_string(),
        author: author.to_string(),
        body: body.to_string(),
        sent_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        origin: Origin::Remote,
    }
}

/// A `DomainContext` that records every `send_message` call.
pub struct RecordingContext {
    pub messages: Vec<Message>,
    pub room_id: Option<String>,
    pub sent: RefCell<Vec<String>>,
}

impl RecordingContext {
    pub fn new(room_id: Option<&str>, messages: Vec<Message>) -> Self {
        Self {
            messages,
            room_id: room_id.map(str::to_string),
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl DomainContext for RecordingContext {
    fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    fn invitation_base_url(&self) -> &str {
        TEST_BASE_URL
    }

    fn send_message(&self, text: String) {
        self.sent.borrow_mut().push(text);
    }
}

/// Flattens a rendered buffer into one string, row by row.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}
