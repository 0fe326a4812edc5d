use std::sync::mpsc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::action::Action;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::chat::Chat;
use crate::tui::component::Component;
use crate::tui::components::{LandingPage, TitleBar};
use crate::tui::context::{AppContext, DomainContext};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) {
    use Constraint::{Length, Min};
    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    let context = AppContext::new(app, tx);

    Chat::new(&mut tui.chat, &context).render(frame, main_area);
    if context.room_id().is_none() {
        LandingPage.render(frame, main_area);
    }

    TitleBar::new(
        app.room_id.as_deref(),
        &app.status_message,
        tui.chat.thread.has_unseen_content,
        app.is_sending(),
    )
    .render(frame, title_area);
}
