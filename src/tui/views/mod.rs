//! TUI Views module
//!
//! Renders the budget view, the status bar and any overlay on top.

pub mod budget_list;
pub mod status_bar;

use ratatui::Frame;

use super::app::App;
use super::dialogs;
use super::layout::{toast_rect, AppLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    budget_list::render_header(frame, layout.header);
    budget_list::render_input(frame, app, layout.input);
    budget_list::render_list(frame, app, layout.list);
    status_bar::render(frame, app, layout.status_bar);

    if let Some(notification) = app.notifications.current() {
        let area = toast_rect(44, 4, frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }

    if app.show_help {
        dialogs::help::render(frame);
    }
}
