//! Display-ready snapshot of the dialog.
//!
//! Built by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer; carries no behaviour of its own.
//!
//! ```
//! use fileseek::ui::viewmodel::*;
//!
//! let vm = UIViewModel {
//!     display_items: vec![DisplayItem {
//!         name: "main.py".to_string(),
//!         path: "/src/main.py".to_string(),
//!         is_directory: false,
//!         is_selected: true,
//!         highlight_ranges: vec![(0, 4)],
//!     }],
//!     selected_index: 0,
//!     header: HeaderInfo { title: " Find File ".to_string() },
//!     footer: FooterInfo { keybindings: "Esc: close".to_string() },
//!     empty_state: None,
//!     search_bar: SearchBarInfo { query: "main".to_string(), placeholder: String::new() },
//! };
//! assert_eq!(vm.display_items.len(), 1);
//! ```

/// Everything the renderer draws in one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Visible window of the result list.
    pub display_items: Vec<DisplayItem>,

    /// Cursor position within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Placeholder replacing the list, if any.
    pub empty_state: Option<EmptyState>,

    /// The query input, always shown while the dialog is open.
    pub search_bar: SearchBarInfo,
}

/// One result row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// File or directory name, possibly truncated.
    pub name: String,

    /// Host path, truncated from the left when too wide.
    pub path: String,

    pub is_directory: bool,

    pub is_selected: bool,

    /// Character ranges of `name` matched by the query, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding hints.
    pub keybindings: String,
}

/// Placeholder text shown instead of the result list.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current query text.
    pub query: String,

    /// Hint shown while the query is empty.
    pub placeholder: String,
}
