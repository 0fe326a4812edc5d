//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Data Flow
//!
//! ```text
//! key press ─► TuiEvent ─► Chat / MessageForm ─► DomainContext::send_message
//!                                                   │
//!                                       Action::SendMessage (mpsc)
//!                                                   ▼
//!                  update(App) ─► Effect::Deliver ─► tokio task ─► RoomTransport
//!                                                                      │
//!                                        Action::MessageDelivered ◄────┘
//! ```
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only draws after a terminal event or an
//! action from a background task. Idle polls block for up to 250ms.

pub mod chat;
mod component;
pub mod components;
pub mod context;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::message::Message;
use crate::core::state::App;
use crate::core::transport::{RoomTransport, TransportError};
use crate::tui::chat::{Chat, ChatState};
use crate::tui::component::EventHandler;
use crate::tui::context::AppContext;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Upper bound on a single delivery before it is reported as failed.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);
/// How long an idle loop iteration waits for terminal input.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub chat: ChatState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            chat: ChatState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig, transport: Arc<dyn RoomTransport>) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    // Channel for actions from the room view and background tasks
    let (tx, rx) = mpsc::channel();

    if let Some(room) = &config.initial_room {
        update(&mut app, Action::JoinRoom(room.clone()));
    }
    let mut last_room = app.room_id.clone();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    info!("Event loop started (transport: {})", transport.name());

    let mut needs_redraw = true;
    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, &tx)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = handle_event(&app, &mut tui, &tx, &event) {
                // Loop-level actions go through the same channel as sends
                if tx.send(action).is_err() {
                    warn!("Action channel closed");
                }
            }
        }

        // Handle actions (sends, deliveries, room changes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Deliver { room_id, message } => {
                    spawn_delivery(transport.clone(), room_id, message, tx.clone());
                }
                Effect::Quit | Effect::None => {}
            }
        }

        if app.room_id != last_room {
            tui.chat.thread.reset();
            last_room = app.room_id.clone();
        }

        if !app.is_running {
            break Ok(());
        }
    };

    ratatui::restore();
    info!("Event loop stopped");
    result
}

/// Route one terminal event. Returns a loop-level action, if any.
fn handle_event(
    app: &App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    event: &TuiEvent,
) -> Option<Action> {
    match event {
        TuiEvent::Resize => None,
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::NewRoom => Some(Action::CreateRoom),
        TuiEvent::LeaveRoom if app.room_id.is_some() => Some(Action::LeaveRoom),
        TuiEvent::Escape if app.room_id.is_none() => Some(Action::Quit),
        _ => {
            let context = AppContext::new(app, tx);
            Chat::new(&mut tui.chat, &context).handle_event(event);
            None
        }
    }
}

fn spawn_delivery(
    transport: Arc<dyn RoomTransport>,
    room_id: String,
    message: Message,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning delivery of {} to room {} via {}",
        message.id,
        room_id,
        transport.name()
    );
    tokio::spawn(async move {
        let id = message.id.clone();
        let outcome = match tokio::time::timeout(
            DELIVERY_TIMEOUT,
            transport.deliver(&room_id, message),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout),
        };

        let action = match outcome {
            Ok(delivered) => Action::MessageDelivered(delivered),
            Err(e) => {
                warn!("Delivery of {} failed: {}", id, e);
                Action::DeliveryFailed {
                    id: id.clone(),
                    error: e.to_string(),
                }
            }
        };

        if tx.send(action).is_err() {
            warn!("Failed to report delivery of {}: receiver dropped", id);
        }
    });
}
