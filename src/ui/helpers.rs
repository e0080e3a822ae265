//! Frame buffer and text helpers shared by the components.
//!
//! Components draw into a [`Frame`] instead of stdout, so a whole dialog can be
//! rendered to a string and inspected in tests. The plugin prints the finished
//! frame once per render call.

use crate::ui::theme::Theme;
use std::fmt::Write;

/// ANSI output for one render pass.
#[derive(Debug, Default)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to `row` (1-indexed), column 1.
    pub fn goto(&mut self, row: usize) {
        let _ = write!(self.buf, "\u{1b}[{row};1H");
    }

    /// Appends raw text or escape sequences.
    pub fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Appends `count` spaces.
    pub fn pad(&mut self, count: usize) {
        self.buf.extend(std::iter::repeat(' ').take(count));
    }

    /// The rendered output.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Number of terminal cells `text` occupies, counting one per character.
#[must_use]
pub fn visual_len(text: &str) -> usize {
    text.chars().count()
}

/// Draws `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive. Highlights are
/// suppressed on the selected row so the selection colors stay intact.
pub fn render_highlighted_text(frame: &mut Frame, text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        frame.push(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        frame.push(&chars[current_pos..start].iter().collect::<String>());
        frame.push(&Theme::fg(&theme.colors.match_highlight_fg));
        frame.push(&Theme::bg(&theme.colors.match_highlight_bg));
        frame.push(&chars[start..end].iter().collect::<String>());
        frame.push(Theme::reset());
        frame.push(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    frame.push(&chars[current_pos..].iter().collect::<String>());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match (in_escape, c) {
                (false, '\u{1b}') => in_escape = true,
                (true, c) if c.is_ascii_alphabetic() => in_escape = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }

    #[test]
    fn highlighting_preserves_the_text() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "main.rs", &[(0, 2), (5, 7)], &theme, false);
        let out = frame.into_string();
        assert_eq!(strip_ansi(&out), "main.rs");
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn out_of_range_highlights_are_clamped() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "ab", &[(1, 10), (0, 1)], &theme, false);
        assert_eq!(strip_ansi(&frame.into_string()), "ab");
    }

    #[test]
    fn visual_len_counts_characters() {
        assert_eq!(visual_len("naïve"), 5);
    }
}
