//! Color themes for the TUI.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

static THEME_NAME: OnceLock<String> = OnceLock::new();

/// A complete color theme.
pub struct Theme {
    pub status_bar: Style,
    pub key_hint: Style,
    pub list_selected: Style,
    pub list_header: Style,
    pub list_normal: Style,
    pub attachment: Style,
    pub label: Style,
    pub value: Style,
    pub url: Style,
    pub border: Style,
    pub popup: Style,
    pub popup_title: Style,
    pub input: Style,
    pub success: Style,
    pub failure: Style,
    pub dim: Style,
}

impl Theme {
    /// Dark theme (default).
    pub fn dark() -> Self {
        Self {
            status_bar: Style::default()
                .fg(Color::Rgb(150, 150, 170))
                .bg(Color::Rgb(30, 30, 46)),
            key_hint: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            list_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 100)),
            list_header: Style::default()
                .fg(Color::Rgb(180, 180, 200))
                .bg(Color::Rgb(40, 40, 60))
                .add_modifier(Modifier::BOLD),
            list_normal: Style::default().fg(Color::Rgb(200, 200, 220)),
            attachment: Style::default().fg(Color::Green),
            label: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::Rgb(220, 220, 230)),
            url: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            popup: Style::default()
                .fg(Color::Rgb(220, 220, 230))
                .bg(Color::Rgb(20, 20, 35)),
            popup_title: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            input: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(45, 45, 70)),
            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            failure: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(110, 110, 130)),
        }
    }

    /// Light theme for bright terminals.
    pub fn light() -> Self {
        Self {
            status_bar: Style::default()
                .fg(Color::Rgb(60, 60, 70))
                .bg(Color::Rgb(220, 220, 230)),
            key_hint: Style::default()
                .fg(Color::Rgb(150, 90, 0))
                .add_modifier(Modifier::BOLD),
            list_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(190, 200, 240)),
            list_header: Style::default()
                .fg(Color::Rgb(40, 40, 60))
                .bg(Color::Rgb(210, 210, 225))
                .add_modifier(Modifier::BOLD),
            list_normal: Style::default().fg(Color::Rgb(30, 30, 40)),
            attachment: Style::default().fg(Color::Rgb(0, 120, 0)),
            label: Style::default()
                .fg(Color::Rgb(30, 70, 170))
                .add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::Rgb(30, 30, 40)),
            url: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            border: Style::default().fg(Color::Rgb(150, 150, 170)),
            popup: Style::default()
                .fg(Color::Rgb(30, 30, 40))
                .bg(Color::Rgb(245, 245, 250)),
            popup_title: Style::default()
                .fg(Color::Rgb(30, 70, 170))
                .add_modifier(Modifier::BOLD),
            input: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(225, 225, 240)),
            success: Style::default()
                .fg(Color::Rgb(0, 120, 0))
                .add_modifier(Modifier::BOLD),
            failure: Style::default()
                .fg(Color::Rgb(180, 0, 0))
                .add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(120, 120, 130)),
        }
    }
}

/// Select the theme by name ("dark" or "light"). Only the first call counts.
pub fn set_theme(name: &str) {
    let _ = THEME_NAME.set(name.to_lowercase());
}

/// Return the active theme.
pub fn current_theme() -> Theme {
    match THEME_NAME.get().map(String::as_str) {
        Some("light") => Theme::light(),
        _ => Theme::dark(),
    }
}
