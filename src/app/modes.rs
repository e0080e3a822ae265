//! Dialog phases and hand-off targets.
//!
//! # State Machine
//!
//! ```text
//!            toggle / open
//!   Closed ─────────────────▶ OpenEmpty ◀──── text cleared ────┐
//!     ▲                          │                             │
//!     │                          └──── text entered ──▶ OpenSearching
//!     │                                                        │
//!     └──── toggle / dismiss / select (from either open phase) ┘
//! ```
//!
//! The phase is derived from `is_open` and the trimmed query rather than
//! stored, so it cannot drift from the state it describes.

use crate::domain::FileEntry;
use serde::{Deserialize, Serialize};

/// Observable phase of the file search dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    /// Dialog hidden; query and results are empty.
    Closed,

    /// Dialog visible with no (or whitespace-only) query.
    ///
    /// Shows the "type to search" placeholder.
    OpenEmpty,

    /// Dialog visible with a query; results are pending or loaded.
    OpenSearching,
}

/// Panels of the surrounding shell that a selection can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    /// Generic viewer for any file or directory.
    FileViewer,
    /// In-editor open action, only for entries flagged as editor-openable.
    Editor,
}

impl Panel {
    /// Picks the panel a selected entry is handed to.
    ///
    /// # Example
    ///
    /// ```
    /// use fileseek::app::Panel;
    /// use fileseek::domain::FileEntry;
    ///
    /// let entry = FileEntry::new("/host/main.py", "main.py", "/main.py", false);
    /// assert_eq!(Panel::for_entry(&entry), Panel::FileViewer);
    /// ```
    #[must_use]
    pub const fn for_entry(entry: &FileEntry) -> Self {
        if entry.is_openable_in_editor {
            Self::Editor
        } else {
            Self::FileViewer
        }
    }
}
