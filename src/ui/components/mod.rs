//! Dialog components.
//!
//! Layout, top to bottom:
//!
//! ```text
//! [blank]
//! [Header]
//! [Border]
//! [Search bar, 3 lines]
//! [Table headers]        or  [Placeholder]
//! [Table rows]
//! [padding]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame.goto(row);
    frame.push(&Theme::fg(color));
    frame.push(&"─".repeat(cols));
    frame.push(Theme::reset());
    row + 1
}

/// Draws the whole dialog into `frame`.
pub fn render_dialog(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(frame, current_row, &vm.search_bar, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(frame, current_row, empty, theme, cols);
    } else {
        current_row = render_table_headers(frame, current_row, theme);
        render_table_rows(frame, current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows.saturating_sub(1).max(current_row + 1);
    render_border(frame, footer_row - 1, &theme.colors.border, cols);
    render_footer(frame, footer_row, &vm.footer, theme, cols);
}
