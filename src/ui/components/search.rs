//! Query input box.

use crate::ui::helpers::{visual_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin around the box.
const SEARCH_BOX_MARGIN: usize = 2;

/// Draws a three-line bordered box holding the query, or the placeholder
/// while the query is empty. Returns the next free row.
///
/// ```text
///   ┌──────────────────────┐
///   │ > main.py▏           │
///   └──────────────────────┘
/// ```
pub fn render_search_bar(frame: &mut Frame, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    frame.goto(row);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.push(&border);
    frame.push(&format!("┌{}┐", "─".repeat(inner_width)));
    frame.push(Theme::reset());

    let (text, color) = if search.query.is_empty() {
        (format!(" > {}", search.placeholder), &theme.colors.placeholder_fg)
    } else {
        (format!(" > {}▏", search.query), &theme.colors.text_normal)
    };
    let text: String = text.chars().take(inner_width).collect();

    frame.goto(row + 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.push(&border);
    frame.push("│");
    frame.push(&Theme::fg(color));
    frame.push(&text);
    frame.pad(inner_width.saturating_sub(visual_len(&text)));
    frame.push(&border);
    frame.push("│");
    frame.push(Theme::reset());

    frame.goto(row + 2);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.push(&border);
    frame.push(&format!("└{}┘", "─".repeat(inner_width)));
    frame.push(Theme::reset());

    row + 3
}
