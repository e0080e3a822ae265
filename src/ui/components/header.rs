//! Dialog title bar.

use crate::ui::helpers::{visual_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Draws the centered, bold title. Returns the next free row.
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = visual_len(&header.title).min(cols);
    let padding = cols.saturating_sub(title_len) / 2;

    frame.goto(row);
    frame.push(Theme::bold());
    frame.push(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        frame.push(&Theme::bg(bg));
    }

    frame.pad(padding);
    frame.push(&header.title.chars().take(title_len).collect::<String>());
    frame.pad(cols.saturating_sub(padding + title_len));
    frame.push(Theme::reset());
    row + 1
}
