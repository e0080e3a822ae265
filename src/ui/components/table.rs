//! Result list: a NAME column and a PATH column.

use crate::ui::helpers::{self, visual_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Width of the NAME column including its icon.
pub const NAME_COLUMN_WIDTH: usize = 37;

const DIRECTORY_ICON: &str = "▸ ";
const FILE_ICON: &str = "  ";

pub fn render_table_headers(frame: &mut Frame, row: usize, theme: &Theme) -> usize {
    frame.goto(row);
    frame.push(Theme::bold());
    frame.push(&Theme::fg(&theme.colors.header_fg));
    frame.push(&format!("{:<NAME_COLUMN_WIDTH$} {}", "  NAME", "PATH"));
    frame.push(Theme::reset());
    row + 1
}

pub fn render_table_rows(frame: &mut Frame, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    items
        .iter()
        .fold(row, |current_row, item| render_table_row(frame, current_row, item, theme, cols))
}

/// Draws one row, padded to the full width so the selection bar is solid.
///
/// Selection colors win over the directory color and match highlights.
fn render_table_row(frame: &mut Frame, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    frame.goto(row);

    let base = if item.is_selected {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else if item.is_directory {
        Theme::fg(&theme.colors.directory_fg)
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    frame.push(&base);

    frame.push(if item.is_directory { DIRECTORY_ICON } else { FILE_ICON });
    helpers::render_highlighted_text(frame, &item.name, &item.highlight_ranges, theme, item.is_selected);

    let name_len = visual_len(DIRECTORY_ICON) + visual_len(&item.name);
    frame.pad(NAME_COLUMN_WIDTH.saturating_sub(name_len) + 1);

    if !item.is_selected {
        frame.push(&Theme::fg(&theme.colors.text_dim));
    }
    frame.push(&item.path);

    let line_len = NAME_COLUMN_WIDTH.max(name_len) + 1 + visual_len(&item.path);
    frame.pad(cols.saturating_sub(line_len));
    frame.push(Theme::reset());
    row + 1
}
