//! TUI widgets for rendering the different panels.

pub mod attachment_detail;
pub mod attachment_list;
pub mod status_bar;
pub mod two_factor_popup;

use ratatui::layout::Rect;

/// Calculate a centered rectangle.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// `percent` of `len`, without intermediate overflow.
fn scale(len: u16, percent: u16) -> u16 {
    let scaled = u32::from(len) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(len)
}
