//! Derived links and metadata of the selected attachment.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::{current_theme, Theme};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(i18n::tui_details_title())
        .title_style(theme.popup_title);

    let Some(att) = app.current() else {
        frame.render_widget(block, area);
        return;
    };

    let lines = vec![
        Line::from(Span::styled(att.file_name.clone(), theme.attachment)),
        Line::from(""),
        field(&theme, i18n::tui_label_icon(), att.icon_class().as_str(), false),
        field(&theme, i18n::tui_label_cid(), &att.cid_without_tags, false),
        field(&theme, i18n::tui_label_download(), &att.link_download(), true),
        field(&theme, i18n::tui_label_preview(), &att.link_preview_main(), true),
        field(&theme, i18n::tui_label_thumbnail(), &att.link_thumbnail(), true),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn field(theme: &Theme, label: &str, value: &str, is_url: bool) -> Line<'static> {
    let (text, style) = if value.is_empty() {
        (i18n::tui_none().to_string(), theme.dim)
    } else if is_url {
        (value.to_string(), theme.url)
    } else {
        (value.to_string(), theme.value)
    };
    Line::from(vec![
        Span::styled(format!("{label}: "), theme.label),
        Span::styled(text, style),
    ])
}
