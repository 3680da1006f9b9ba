//! Attachment table: icon, name, type, size and preview marker.

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Width reserved for the file name column before truncation.
const NAME_WIDTH: usize = 40;

/// Render the attachment table into `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(i18n::tui_attachments_title())
        .title_style(theme.popup_title);

    if app.attachments.is_empty() {
        let rows = vec![Row::new(vec![
            Cell::from(i18n::tui_no_attachments()).style(theme.list_normal)
        ])];
        let table = Table::new(rows, [Constraint::Min(20)]).block(block);
        frame.render_widget(table, area);
        return;
    }

    let rows: Vec<Row> = app
        .attachments
        .iter()
        .enumerate()
        .map(|(i, att)| {
            let selected = i == app.selected;
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                theme.list_selected
            } else {
                theme.list_normal
            };
            let name_style = if selected {
                theme.list_selected
            } else {
                theme.attachment
            };
            let preview = if att.has_preview() { "*" } else { "" };
            Row::new(vec![
                Cell::from(marker).style(style),
                Cell::from(att.icon_class().glyph()).style(style),
                Cell::from(truncate_str(&att.file_name, NAME_WIDTH)).style(name_style),
                Cell::from(att.mime_type.clone()).style(style),
                Cell::from(att.friendly_size.clone()).style(style),
                Cell::from(preview).style(style),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from(""),
        Cell::from(i18n::tui_col_filename()),
        Cell::from(i18n::tui_col_type()),
        Cell::from(i18n::tui_col_size()),
        Cell::from(i18n::tui_col_preview()),
    ])
    .style(theme.list_header);

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(16),
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(block)
    .column_spacing(1);

    frame.render_widget(table, area);
}

/// Truncate `s` to `max_width` display columns, ending with `...` when cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return s.chars().take(max_width).collect();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w + 3 > max_width {
            break;
        }
        result.push(ch);
        width += w;
    }
    result.push_str("...");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_is_untouched() {
        assert_eq!(truncate_str("report.pdf", 20), "report.pdf");
    }

    #[test]
    fn test_truncate_long_name() {
        assert_eq!(truncate_str("quarterly-report.xlsx", 10), "quarter...");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns wide.
        let t = truncate_str("報告書報告書.pdf", 9);
        assert_eq!(t, "報告書...");
        assert!(UnicodeWidthStr::width(t.as_str()) <= 9);
    }
}
