//! Two-factor test dialog popup.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::{current_theme, Theme};
use crate::view::two_factor::TwoFactorTestView;

/// Render the dialog centered on screen.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = current_theme();
    let area = centered_rect(50, 30, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_two_factor_title())
        .style(theme.popup);

    let paragraph = Paragraph::new(build_lines(&app.two_factor, &theme)).block(block);
    frame.render_widget(paragraph, area);
}

fn build_lines(dialog: &TwoFactorTestView, theme: &Theme) -> Vec<Line<'static>> {
    let cursor = if dialog.code_focused() { "_" } else { "" };
    let (status, status_style) = status_text(dialog, theme);

    let mut test_hint = vec![Span::styled(" Enter", theme.key_hint)];
    test_hint.push(Span::styled(
        format!(":{}", i18n::tui_hint_test()),
        if dialog.can_test() { theme.popup } else { theme.dim },
    ));
    test_hint.push(Span::styled("  Esc", theme.key_hint));
    test_hint.push(Span::styled(
        format!(":{}", i18n::tui_hint_close()),
        theme.popup,
    ));

    vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {}: ", i18n::tui_label_code()), theme.label),
            Span::styled(format!("{}{cursor}", dialog.code()), theme.input),
        ]),
        Line::from(""),
        Line::from(Span::styled(format!(" {status}"), status_style)),
        Line::from(""),
        Line::from(test_hint),
    ]
}

fn status_text(dialog: &TwoFactorTestView, theme: &Theme) -> (&'static str, Style) {
    if dialog.testing() {
        return (i18n::tui_status_testing(), theme.key_hint);
    }
    match dialog.code_status() {
        Some(true) => (i18n::tui_status_success(), theme.success),
        Some(false) => (i18n::tui_status_failure(), theme.failure),
        None => (i18n::tui_status_unknown(), theme.dim),
    }
}
