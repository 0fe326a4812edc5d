//! # Actions
//!
//! Everything that can happen in Huddle becomes an `Action`.
//! User presses Enter in the form? That's `Action::SendMessage(text)`.
//! Transport acknowledges it? That's `Action::MessageDelivered(message)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state and returns an `Effect` describing the I/O the caller should perform.
//! No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::chatroom::{new_room_id, room_id_from_invitation};
use crate::core::message::Message;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Open a fresh room with a newly minted id
    CreateRoom,
    /// Join a room by invitation link or bare id
    JoinRoom(String),
    LeaveRoom,
    /// Text submitted from the message form, forwarded unchanged
    SendMessage(String),
    /// Transport acknowledged an outgoing message
    MessageDelivered(Message),
    DeliveryFailed { id: String, error: String },
    Quit,
}

/// I/O the event loop must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Deliver { room_id: String, message: Message },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::CreateRoom => {
            let room_id = new_room_id();
            info!("Opened room {}", room_id);
            app.status_message = format!("Opened room {}", room_id);
            let notice = format!("{} opened the room", app.display_name);
            enter_room(app, room_id, notice);
            Effect::None
        }
        Action::JoinRoom(input) => {
            let Some(room_id) = room_id_from_invitation(&input) else {
                warn!("Rejected invitation input: {:?}", input);
                app.status_message = String::from("Invalid invitation");
                return Effect::None;
            };
            info!("Joined room {}", room_id);
            app.status_message = format!("Joined room {}", room_id);
            let notice = format!("{} joined the room", app.display_name);
            enter_room(app, room_id, notice);
            Effect::None
        }
        Action::LeaveRoom => {
            if let Some(room_id) = app.room_id.take() {
                info!("Left room {}", room_id);
                app.status_message = format!("Left room {}", room_id);
            }
            app.messages.clear();
            app.pending.clear();
            Effect::None
        }
        Action::SendMessage(text) => {
            let Some(room_id) = app.room_id.clone() else {
                debug!("Dropping message sent outside a room");
                return Effect::None;
            };
            let message = Message::outgoing(&app.display_name, text);
            app.pending.insert(message.id.clone());
            debug!("Queued message {} for room {}", message.id, room_id);
            Effect::Deliver { room_id, message }
        }
        Action::MessageDelivered(message) => {
            // Not pending: a duplicate, or sent from a room we have since left
            if !app.pending.remove(&message.id) {
                debug!("Ignoring stale delivery of {}", message.id);
                return Effect::None;
            }
            app.messages.push(message);
            Effect::None
        }
        Action::DeliveryFailed { id, error } => {
            if !app.pending.remove(&id) {
                debug!("Ignoring stale failure of {}: {}", id, error);
                return Effect::None;
            }
            warn!("Delivery of {} failed: {}", id, error);
            app.status_message = format!("Send failed: {}", error);
            Effect::None
        }
        Action::Quit => {
            app.is_running = false;
            Effect::Quit
        }
    }
}

/// Switch to `room_id`, dropping the previous room's scrollback.
/// A fresh scrollback starts with `notice`.
fn enter_room(app: &mut App, room_id: String, notice: String) {
    if app.room_id.as_deref() == Some(room_id.as_str()) {
        return;
    }
    app.messages.clear();
    app.pending.clear();
    app.messages.push(Message::system(notice));
    app.room_id = Some(room_id);
}
