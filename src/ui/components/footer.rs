//! Keybinding hints at the bottom of the dialog.

use crate::ui::helpers::{visual_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let text: String = footer.keybindings.chars().take(cols).collect();
    let text_len = visual_len(&text);
    let padding = cols.saturating_sub(text_len) / 2;

    frame.goto(row);
    frame.push(&Theme::fg(&theme.colors.text_dim));
    frame.pad(padding);
    frame.push(&text);
    frame.pad(cols.saturating_sub(padding + text_len));
    frame.push(Theme::reset());
    row + 1
}
