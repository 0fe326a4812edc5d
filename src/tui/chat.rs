//! # Room View
//!
//! Composes the active room: invitation link on top, scrollback in the middle,
//! message form at the bottom. Everything it shows comes from a
//! [`DomainContext`]; everything the user submits goes back to it unchanged.
//! With no active room the view renders nothing and ignores events.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::chatroom::invitation_link;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::invitation::INVITATION_HEIGHT;
use crate::tui::components::{Form, FormEvent, Invitation, MessageThread, MessageThreadState};
use crate::tui::context::DomainContext;
use crate::tui::event::TuiEvent;

/// Placeholder of the message form.
pub const MESSAGE_PLACEHOLDER: &str = "what's up?";

/// Presentation state the room view keeps between frames.
pub struct ChatState {
    pub thread: MessageThreadState,
    pub form: Form,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            thread: MessageThreadState::new(),
            form: Form::new(),
        }
    }
}

/// The room view. Created fresh each frame.
pub struct Chat<'a, C: DomainContext + ?Sized> {
    pub state: &'a mut ChatState,
    pub context: &'a C,
}

impl<'a, C: DomainContext + ?Sized> Chat<'a, C> {
    pub fn new(state: &'a mut ChatState, context: &'a C) -> Self {
        Self { state, context }
    }
}

impl<C: DomainContext + ?Sized> Component for Chat<'_, C> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(room_id) = active_room(self.context) else {
            return;
        };

        let link = invitation_link(self.context.invitation_base_url(), room_id);
        let mut form = MessageForm::new(&mut self.state.form, self.context);
        let form_height = form.height(area.width);

        let [invitation_area, thread_area, form_area] = Layout::vertical([
            Constraint::Length(INVITATION_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(form_height),
        ])
        .areas(area);

        Invitation::new(&link).render(frame, invitation_area);
        MessageThread::new(&mut self.state.thread, self.context.messages())
            .render(frame, thread_area);
        form.render(frame, form_area);
    }
}

impl<C: DomainContext + ?Sized> EventHandler for Chat<'_, C> {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        active_room(self.context)?;

        match event {
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::ScrollToBottom => {
                self.state.thread.handle_event(event);
                None
            }
            _ => MessageForm::new(&mut self.state.form, self.context).handle_event(event),
        }
    }
}

/// The context's room id, treating an empty id as no room.
fn active_room<C: DomainContext + ?Sized>(context: &C) -> Option<&str> {
    context.room_id().filter(|id| !id.is_empty())
}

/// The form wired to the context's send action.
struct MessageForm<'a, C: DomainContext + ?Sized> {
    form: &'a mut Form,
    context: &'a C,
}

impl<'a, C: DomainContext + ?Sized> MessageForm<'a, C> {
    fn new(form: &'a mut Form, context: &'a C) -> Self {
        if form.placeholder != MESSAGE_PLACEHOLDER {
            form.placeholder = MESSAGE_PLACEHOLDER.to_string();
        }
        Self { form, context }
    }

    fn height(&self, width: u16) -> u16 {
        self.form.calculate_height(width)
    }
}

impl<C: DomainContext + ?Sized> Component for MessageForm<'_, C> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.form.render(frame, area);
    }
}

impl<C: DomainContext + ?Sized> EventHandler for MessageForm<'_, C> {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let form_event = self.form.handle_event(event)?;
        if let FormEvent::Submit(text) = &form_event {
            self.context.send_message(text.clone());
        }
        Some(form_event)
    }
}
