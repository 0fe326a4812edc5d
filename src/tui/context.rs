//! # Domain Context
//!
//! What the room view is allowed to see of the application: the message list,
//! the active room and a way to send. Views read it; they never mutate `App`.

use std::sync::mpsc;

use log::warn;

use crate::core::action::Action;
use crate::core::message::Message;
use crate::core::state::App;

pub trait DomainContext {
    /// Scrollback of the active room, oldest first.
    fn messages(&self) -> &[Message];

    /// Active room, `None` when no room is open.
    fn room_id(&self) -> Option<&str>;

    /// Base URL invitation links are derived from.
    fn invitation_base_url(&self) -> &str;

    /// Hand a submitted message to whoever does the sending.
    fn send_message(&self, text: String);
}

/// The live context: reads from `App`, sends through the action channel.
pub struct AppContext<'a> {
    app: &'a App,
    tx: &'a mpsc::Sender<Action>,
}

impl<'a> AppContext<'a> {
    pub fn new(app: &'a App, tx: &'a mpsc::Sender<Action>) -> Self {
        Self { app, tx }
    }
}

impl DomainContext for AppContext<'_> {
    fn messages(&self) -> &[Message] {
        &self.app.messages
    }

    fn room_id(&self) -> Option<&str> {
        self.app.room_id.as_deref()
    }

    fn invitation_base_url(&self) -> &str {
        &self.app.invitation_base_url
    }

    fn send_message(&self, text: String) {
        if self.tx.send(Action::SendMessage(text)).is_err() {
            warn!("Failed to queue outgoing message: receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app_in_room;

    #[test]
    fn app_context_reads_app_state() {
        let mut app = test_app_in_room("abc");
        app.messages.push(Message::system("hi"));
        let (tx, _rx) = mpsc::channel();
        let ctx = AppContext::new(&app, &tx);

        assert_eq!(ctx.room_id(), Some("abc"));
        assert_eq!(ctx.messages().len(), 1);
        assert_eq!(ctx.invitation_base_url(), app.invitation_base_url);
    }

    #[test]
    fn send_message_queues_action() {
        let app = test_app_in_room("abc");
        let (tx, rx) = mpsc::channel();
        AppContext::new(&app, &tx).send_message("hello".into());

        assert_eq!(rx.try_recv().unwrap(), Action::SendMessage("hello".into()));
        assert!(rx.try_recv().is_err());
    }
}
