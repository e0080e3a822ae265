//! Placeholder drawn in place of the result list.

use crate::ui::helpers::{visual_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Draws the placeholder centered on `row`, one blank line below the list top.
pub fn render_empty_state(frame: &mut Frame, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let msg_len = visual_len(&empty.message);
    let padding = cols.saturating_sub(msg_len) / 2;

    frame.goto(row + 1);
    frame.push(&Theme::fg(&theme.colors.empty_state_fg));
    frame.pad(padding);
    frame.push(&empty.message);
    frame.pad(cols.saturating_sub(padding + msg_len));
    frame.push(Theme::reset());
    row + 2
}
