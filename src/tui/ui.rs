//! Main render function that dispatches to widgets.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use super::app::App;
use super::widgets;

/// Render the entire TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // content
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    if !app.dialog_only {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical[0]);
        widgets::attachment_list::render(frame, app, split[0]);
        widgets::attachment_detail::render(frame, app, split[1]);
    }

    widgets::status_bar::render(frame, app, vertical[1]);

    // Popups (rendered on top of everything)
    if app.show_two_factor {
        widgets::two_factor_popup::render(frame, app);
    }
}
