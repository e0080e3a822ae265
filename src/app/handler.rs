//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point that mutates [`AppState`]. The
//! plugin shim translates Zellij events (keys, timers, worker messages, pipe
//! messages) into [`Event`]s and executes the returned actions.
//!
//! # Key Routing
//!
//! Every key goes to the shortcut listener first. The toggle chord is consumed
//! there and never reaches the query. Other keys are mapped to dialog events
//! only while the dialog is open:
//!
//! | key | event |
//! |---|---|
//! | `Esc` | [`Event::Close`] |
//! | `Enter` | [`Event::SelectCurrent`] |
//! | `Down`, `Ctrl n` | [`Event::SelectionDown`] |
//! | `Up`, `Ctrl p` | [`Event::SelectionUp`] |
//! | `Backspace` | [`Event::Backspace`] |
//! | `Ctrl u` | [`Event::ClearQuery`] |
//! | printable character | [`Event::Char`] |
//!
//! # Example
//!
//! ```
//! use fileseek::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (render, actions) = handle_event(&mut state, &Event::Toggle)?;
//! assert!(render);
//! assert_eq!(actions, vec![Action::ShowDialog]);
//! # Ok::<(), fileseek::domain::FileSeekError>(())
//! ```

use super::hotkeys::HotkeyAction;
use super::shortcut::{KeyDisposition, ShortcutListener};
use crate::app::{Action, AppState};
use crate::domain::error::{FileSeekError, Result};
use crate::worker::WorkerResponse;
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Events delivered to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Raw key press, routed through the shortcut listener.
    Key(KeyWithModifier),

    /// Flips dialog visibility (shortcut or `toggle` pipe message).
    Toggle,
    /// Opens the dialog; no-op when already open.
    Open,
    /// Dismisses the dialog.
    Close,

    /// Replaces the whole query text.
    QueryChanged(String),
    /// Appends a character to the query.
    Char(char),
    /// Removes the last query character.
    Backspace,
    /// Empties the query.
    ClearQuery,

    /// Moves the cursor down (wraps to top).
    SelectionDown,
    /// Moves the cursor up (wraps to bottom).
    SelectionUp,
    /// Hands the entry under the cursor off to the shell.
    SelectCurrent,

    /// A host timer elapsed.
    TimerFired,

    /// Live update of a hotkey binding.
    RebindHotkey {
        action: HotkeyAction,
        /// New chord descriptor; blank removes the binding.
        key: String,
    },

    /// Response from the file index worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns [`FileSeekError::Config`] when a rebind names a descriptor that
/// cannot be parsed as a chord. State is left unchanged in that case.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Key(key) => handle_key(state, key),
        Event::Toggle => Ok((true, state.toggle())),
        Event::Open => Ok((true, state.open())),
        Event::Close => Ok((true, state.close())),
        Event::QueryChanged(text) => Ok((state.is_open(), state.on_query_changed(text.clone()))),
        Event::Char(c) => Ok((state.is_open(), state.push_char(*c))),
        Event::Backspace => Ok((state.is_open(), state.pop_char())),
        Event::ClearQuery => Ok((state.is_open(), state.on_query_changed(""))),
        Event::SelectionDown => {
            state.move_selection_down();
            Ok((state.is_open(), vec![]))
        }
        Event::SelectionUp => {
            state.move_selection_up();
            Ok((state.is_open(), vec![]))
        }
        Event::SelectCurrent => {
            let actions = state.select_current();
            Ok((!actions.is_empty(), actions))
        }
        Event::TimerFired => Ok((false, state.on_timer())),
        Event::RebindHotkey { action, key } => rebind(state, *action, key),
        Event::WorkerResponse(response) => Ok((handle_worker_response(state, response), vec![])),
    }
}

fn handle_key(state: &mut AppState, key: &KeyWithModifier) -> Result<(bool, Vec<Action>)> {
    if ShortcutListener::default().evaluate(&state.hotkeys, key) == KeyDisposition::Toggle {
        return handle_event(state, &Event::Toggle);
    }

    if !state.is_open() {
        return Ok((false, vec![]));
    }

    match map_dialog_key(key) {
        Some(event) => handle_event(state, &event),
        None => {
            tracing::trace!(key = ?key, "unmapped key");
            Ok((false, vec![]))
        }
    }
}

/// Maps a non-shortcut key to a dialog event.
fn map_dialog_key(key: &KeyWithModifier) -> Option<Event> {
    let ctrl_only = key.key_modifiers.len() == 1 && key.key_modifiers.contains(&KeyModifier::Ctrl);
    let plain = key.key_modifiers.iter().all(|m| *m == KeyModifier::Shift);

    match key.bare_key {
        BareKey::Esc if plain => Some(Event::Close),
        BareKey::Enter if plain => Some(Event::SelectCurrent),
        BareKey::Down if plain => Some(Event::SelectionDown),
        BareKey::Up if plain => Some(Event::SelectionUp),
        BareKey::Backspace if plain => Some(Event::Backspace),
        BareKey::Char('n') if ctrl_only => Some(Event::SelectionDown),
        BareKey::Char('p') if ctrl_only => Some(Event::SelectionUp),
        BareKey::Char('u') if ctrl_only => Some(Event::ClearQuery),
        BareKey::Char(c) if plain => Some(Event::Char(c)),
        _ => None,
    }
}

fn rebind(state: &mut AppState, action: HotkeyAction, key: &str) -> Result<(bool, Vec<Action>)> {
    let key = key.trim();
    if key.is_empty() {
        state.hotkeys.unbind(action);
        return Ok((state.is_open(), vec![]));
    }

    if super::shortcut::Chord::parse(key).is_none() {
        return Err(FileSeekError::Config(format!("invalid chord for {action}: {key:?}")));
    }

    state.hotkeys.bind(action, key);
    Ok((state.is_open(), vec![]))
}

/// Applies a worker response. Returns whether the dialog needs a redraw.
fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> bool {
    match response {
        WorkerResponse::SearchCompleted { request_id, files } => {
            state.on_search_completed(*request_id, files.clone()) && state.is_open()
        }
        WorkerResponse::SearchFailed { request_id, message } => {
            state.on_search_failed(*request_id, message) && state.is_open()
        }
        WorkerResponse::Error { message } => {
            tracing::warn!(error = %message, "worker error");
            state.abandon_pending_request() && state.is_open()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DialogPhase, Panel};
    use crate::domain::FileEntry;
    use crate::worker::WorkerMessage;

    fn key(c: char) -> Event {
        Event::Key(KeyWithModifier::new(BareKey::Char(c)))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyWithModifier::new(BareKey::Char(c)).with_ctrl_modifier())
    }

    fn bare(k: BareKey) -> Event {
        Event::Key(KeyWithModifier::new(k))
    }

    fn run(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    fn search_until_results(state: &mut AppState, query: &str, files: Vec<FileEntry>) {
        for c in query.chars() {
            run(state, key(c));
        }
        let mut posted = None;
        while state.search_scheduled() {
            for action in run(state, Event::TimerFired) {
                if let Action::PostToWorker(WorkerMessage::SearchFiles { request_id, .. }) = action {
                    posted = Some(request_id);
                }
            }
        }
        let request_id = posted.unwrap();
        run(state, Event::WorkerResponse(WorkerResponse::SearchCompleted { request_id, files }));
    }

    #[test]
    fn toggle_chord_is_consumed_not_typed() {
        let mut state = AppState::default();
        assert_eq!(run(&mut state, ctrl('p')), vec![Action::ShowDialog]);
        assert!(state.query.is_empty());

        assert_eq!(run(&mut state, ctrl('p')), vec![Action::HideDialog]);
        assert_eq!(state.phase(), DialogPhase::Closed);
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let mut state = AppState::default();
        let (render, actions) = handle_event(&mut state, &key('a')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.query.is_empty());
    }

    #[test]
    fn typing_edits_the_query_and_arms_timers() {
        let mut state = AppState::default();
        run(&mut state, Event::Open);

        assert!(matches!(run(&mut state, key('a')).as_slice(), [Action::ArmTimer(_)]));
        run(&mut state, Event::Key(KeyWithModifier::new(BareKey::Char('B')).with_shift_modifier()));
        assert_eq!(state.query, "aB");

        run(&mut state, bare(BareKey::Backspace));
        assert_eq!(state.query, "a");

        run(&mut state, ctrl('u'));
        assert!(state.query.is_empty());
        assert!(!state.search_scheduled());
    }

    #[test]
    fn escape_closes_and_resets() {
        let mut state = AppState::default();
        run(&mut state, Event::Open);
        run(&mut state, key('x'));

        assert_eq!(run(&mut state, bare(BareKey::Esc)), vec![Action::HideDialog]);
        assert!(state.query.is_empty());
        assert!(!state.search_scheduled());
    }

    #[test]
    fn enter_hands_the_cursor_entry_to_the_viewer() {
        let mut state = AppState::default();
        run(&mut state, Event::Open);
        let files = vec![
            FileEntry::new("/host/a.rs", "a.rs", "/a.rs", false),
            FileEntry::new("/host/b.rs", "b.rs", "/b.rs", false),
        ];
        search_until_results(&mut state, "rs", files.clone());

        run(&mut state, bare(BareKey::Down));
        let actions = run(&mut state, bare(BareKey::Enter));
        assert_eq!(
            actions,
            vec![
                Action::HideDialog,
                Action::SetFileToOpen(files[1].clone()),
                Action::OpenApplication(Panel::FileViewer),
            ]
        );
        assert_eq!(state.phase(), DialogPhase::Closed);
    }

    #[test]
    fn ctrl_p_navigates_once_the_toggle_moves_elsewhere() {
        let mut state = AppState::default();
        handle_event(
            &mut state,
            &Event::RebindHotkey { action: HotkeyAction::FileSearch, key: "Alt f".to_string() },
        )
        .unwrap();

        assert!(run(&mut state, ctrl('p')).is_empty());
        assert_eq!(state.phase(), DialogPhase::Closed);

        let alt_f = Event::Key(KeyWithModifier::new(BareKey::Char('f')).with_alt_modifier());
        assert_eq!(run(&mut state, alt_f), vec![Action::ShowDialog]);
    }

    #[test]
    fn invalid_rebind_is_rejected_and_keeps_the_old_chord() {
        let mut state = AppState::default();
        let result = handle_event(
            &mut state,
            &Event::RebindHotkey { action: HotkeyAction::FileSearch, key: "Hyper q".to_string() },
        );
        assert!(matches!(result, Err(FileSeekError::Config(_))));
        assert_eq!(run(&mut state, ctrl('p')), vec![Action::ShowDialog]);
    }

    #[test]
    fn blank_rebind_unbinds() {
        let mut state = AppState::default();
        run(&mut state, Event::RebindHotkey { action: HotkeyAction::FileSearch, key: "  ".to_string() });
        assert!(run(&mut state, ctrl('p')).is_empty());
        assert!(!state.is_open());
    }

    #[test]
    fn worker_error_releases_the_pending_request() {
        let mut state = AppState::default();
        run(&mut state, Event::Open);
        search_until_results(&mut state, "ma", vec![FileEntry::new("1", "map.txt", "/map.txt", false)]);

        run(&mut state, key('i'));
        run(&mut state, key('n'));
        while state.search_scheduled() {
            run(&mut state, Event::TimerFired);
        }
        assert!(state.pending_request().is_some());

        let error = Event::WorkerResponse(WorkerResponse::Error { message: "gone".to_string() });
        assert!(handle_event(&mut state, &error).unwrap().0);
        assert_eq!(state.pending_request(), None);
        assert_eq!(state.query, "main");
        assert!(state.results.is_empty());
    }

    #[test]
    fn worker_error_without_a_pending_request_keeps_results() {
        let mut state = AppState::default();
        run(&mut state, Event::Open);
        let shown = vec![FileEntry::new("1", "main.rs", "/main.rs", false)];
        search_until_results(&mut state, "main", shown.clone());

        let error = Event::WorkerResponse(WorkerResponse::Error { message: "bad json".to_string() });
        assert!(!handle_event(&mut state, &error).unwrap().0);
        assert_eq!(state.results, shown);
    }
}
