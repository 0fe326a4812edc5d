//! # Application State
//!
//! Core business state for Huddle. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── room_id: Option<String>        // active room (None = no room)
//! ├── messages: Vec<Message>         // scrollback, in delivery order
//! ├── display_name: String           // author name for outgoing messages
//! ├── invitation_base_url: String    // base for invitation links
//! ├── status_message: String         // status bar text
//! ├── pending: HashSet<String>       // outgoing ids awaiting delivery
//! └── is_running: bool               // false once Quit was handled
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashSet;

use crate::core::config::ResolvedConfig;
use crate::core::message::Message;

pub struct App {
    pub room_id: Option<String>,
    pub messages: Vec<Message>,
    pub display_name: String,
    pub invitation_base_url: String,
    pub status_message: String,
    pub pending: HashSet<String>,
    pub is_running: bool,
}

impl App {
    pub fn new(display_name: String, invitation_base_url: String) -> Self {
        Self {
            room_id: None,
            messages: Vec::new(),
            display_name,
            invitation_base_url,
            status_message: String::from("Welcome to Huddle!"),
            pending: HashSet::new(),
            is_running: true,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.display_name.clone(),
            config.invitation_base_url.clone(),
        )
    }

    /// True while at least one outgoing message has not been acknowledged.
    pub fn is_sending(&self) -> bool {
        !self.pending.is_empty()
    }
}
