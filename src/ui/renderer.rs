//! Top-level rendering entry points.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_dialog → Frame → stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Renders the dialog to stdout.
///
/// Nothing is drawn while the dialog is closed.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    if !state.is_open() {
        return;
    }
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders the dialog into an ANSI string.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = Frame::new();
    components::render_dialog(&mut frame, &viewmodel, &state.theme, rows, cols);
    frame.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{NO_FILES_FOUND, TYPE_TO_SEARCH};
    use crate::domain::FileEntry;

    #[test]
    fn empty_dialog_shows_the_type_to_search_placeholder() {
        let mut state = AppState::default();
        state.open();
        let out = render_to_string(&state, 24, 80);
        assert!(out.contains(TYPE_TO_SEARCH));
        assert!(out.contains("Find File"));
        assert!(out.contains("Search files..."));
    }

    #[test]
    fn results_are_listed_with_their_host_paths() {
        let mut state = AppState::default();
        state.open();
        state.on_query_changed("main");
        state.on_timer();
        let id = state.pending_request().unwrap();
        state.on_search_completed(
            id,
            vec![
                FileEntry::new("/host/src/main.py", "main.py", "/src/main.py", false),
                FileEntry::new("/host/main", "main", "/main", true),
            ],
        );

        let out = render_to_string(&state, 24, 80);
        assert!(out.contains("/src/main.py"));
        assert!(out.contains("▸ "));
        assert!(!out.contains(NO_FILES_FOUND));
        assert!(!out.contains(TYPE_TO_SEARCH));
    }

    #[test]
    fn tiny_terminals_do_not_panic() {
        let mut state = AppState::default();
        state.open();
        state.on_query_changed("x");
        let _ = render_to_string(&state, 1, 1);
        let _ = render_to_string(&state, 0, 0);
    }
}
