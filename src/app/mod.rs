//! Application layer: dialog state, events and actions.
//!
//! ```text
//! Key / Timer / Pipe / Worker → Event → handle_event → AppState → Actions → Zellij
//!                                   ↑                                  ↓
//!                                   └──────── Worker Responses ────────┘
//! ```
//!
//! - [`hotkeys`]: action bindings, re-read on every key
//! - [`shortcut`]: chord parsing and the toggle listener
//! - [`debounce`]: single owned debounce ticket over host timers
//! - [`sequencer`]: "last request wins" response filtering
//! - [`state`]: the dialog state machine and view model
//! - [`handler`]: event dispatch
//! - [`actions`]: side effects for the plugin shim

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod hotkeys;
pub mod modes;
pub mod sequencer;
pub mod shortcut;
pub mod state;

pub use actions::Action;
pub use debounce::{Debouncer, DEBOUNCE_DELAY};
pub use handler::{handle_event, Event};
pub use hotkeys::{Hotkey, HotkeyAction, HotkeyRegistry};
pub use modes::{DialogPhase, Panel};
pub use sequencer::{RequestId, RequestSequencer};
pub use shortcut::{Chord, KeyDisposition, ShortcutListener};
pub use state::{AppState, NO_FILES_FOUND, TYPE_TO_SEARCH};
