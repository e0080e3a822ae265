//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never talks to Zellij directly. It
//! mutates [`AppState`](super::AppState) and returns a list of [`Action`]s
//! which the plugin shim executes in order. This keeps every state transition
//! testable without a host.
//!
//! # Example
//!
//! ```
//! use fileseek::app::{Action, Panel};
//! use fileseek::domain::FileEntry;
//!
//! let entry = FileEntry::new("/host/main.py", "main.py", "/main.py", false);
//! let handoff = vec![
//!     Action::HideDialog,
//!     Action::SetFileToOpen(entry),
//!     Action::OpenApplication(Panel::FileViewer),
//! ];
//! assert_eq!(handoff.len(), 3);
//! ```

use super::modes::Panel;
use crate::domain::FileEntry;
use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Makes the plugin pane visible (floating).
    ShowDialog,

    /// Hides the plugin pane.
    HideDialog,

    /// Arms one host timer that fires after the given delay.
    ///
    /// Emitted once per debounce schedule; the timer event is fed back as
    /// [`Event::TimerFired`](super::Event::TimerFired).
    ArmTimer(Duration),

    /// Posts a message to the background worker (the file index).
    PostToWorker(WorkerMessage),

    /// Stores the selected entry as the shell's file to open.
    SetFileToOpen(FileEntry),

    /// Activates a shell panel, which consumes the stored file to open.
    OpenApplication(Panel),
}
