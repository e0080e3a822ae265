//! Dialog state and view model computation.
//!
//! [`AppState`] is the single owner of everything transient about the file
//! search dialog: visibility, the query, the current results and the list
//! cursor. It also owns the debounce ticket and the request sequencer, so every
//! path that ends or supersedes a search goes through one place.
//!
//! # Invariants
//!
//! - `results` only ever holds the response of the latest issued request
//! - `!is_open` implies an empty query and empty results
//! - a blank (empty or whitespace-only) query implies empty results
//! - `selected_index < results.len()`, or `0` when there are no results
//!
//! # Example
//!
//! ```
//! use fileseek::app::{Action, AppState, DialogPhase};
//!
//! let mut state = AppState::default();
//! assert_eq!(state.open(), vec![Action::ShowDialog]);
//!
//! let actions = state.on_query_changed("main");
//! assert_eq!(state.phase(), DialogPhase::OpenSearching);
//! assert!(matches!(actions.as_slice(), [Action::ArmTimer(_)]));
//! ```

use super::actions::Action;
use super::debounce::Debouncer;
use super::hotkeys::{HotkeyAction, HotkeyRegistry};
use super::modes::{DialogPhase, Panel};
use super::sequencer::{RequestId, RequestSequencer};
use crate::domain::{FileEntry, SearchRequestParams};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
use crate::worker::{SearchScope, WorkerMessage};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Placeholder shown while the query is blank.
pub const TYPE_TO_SEARCH: &str = "Type to search for files...";

/// Placeholder shown when a query produced no entries.
pub const NO_FILES_FOUND: &str = "No files found.";

/// Rows taken by header, borders, search bar and footer.
const CHROME_ROWS: usize = 9;

/// Central state of the file search dialog.
#[derive(Debug, Clone)]
pub struct AppState {

    /// Raw query text, updated synchronously on every edit.
    pub query: String,

    /// Entries of the latest accepted search response, in backend order.
    pub results: Vec<FileEntry>,

    /// Cursor position within `results`.
    pub selected_index: usize,

    /// Hotkey bindings, consulted on every key event.
    pub hotkeys: HotkeyRegistry,

    /// Color scheme for rendering.
    pub theme: Theme,

    /// Where the file index searches.
    pub scope: SearchScope,

    /// Written only through [`open`](Self::open), [`close`](Self::close) and
    /// [`toggle`](Self::toggle).
    visible: bool,
    debouncer: Debouncer,
    sequencer: RequestSequencer,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::default(), HotkeyRegistry::with_defaults(), SearchScope::default())
    }
}

impl AppState {
    /// Creates a closed dialog.
    #[must_use]
    pub fn new(theme: Theme, hotkeys: HotkeyRegistry, scope: SearchScope) -> Self {
        Self {
            visible: false,
            query: String::new(),
            results: vec![],
            selected_index: 0,
            hotkeys,
            theme,
            scope,
            debouncer: Debouncer::default(),
            sequencer: RequestSequencer::default(),
        }
    }

    /// Whether the dialog pane is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.visible
    }

    /// Current phase, derived from visibility and the trimmed query.
    #[must_use]
    pub fn phase(&self) -> DialogPhase {
        if !self.visible {
            DialogPhase::Closed
        } else if self.query.trim().is_empty() {
            DialogPhase::OpenEmpty
        } else {
            DialogPhase::OpenSearching
        }
    }

    /// The request whose response is still awaited, if any.
    #[must_use]
    pub const fn pending_request(&self) -> Option<RequestId> {
        self.sequencer.in_flight()
    }

    /// Whether a search is waiting for the debounce period to elapse.
    #[must_use]
    pub const fn search_scheduled(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Opens the dialog in the empty phase. No-op when already open.
    pub fn open(&mut self) -> Vec<Action> {
        if self.visible {
            return vec![];
        }
        tracing::debug!("opening file search dialog");
        self.reset_transient();
        self.visible = true;
        vec![Action::ShowDialog]
    }

    /// Closes the dialog and unconditionally clears all transient state.
    ///
    /// Cancels the pending debounce timer and makes any in-flight response
    /// stale, so nothing can repopulate the dialog after it closed.
    pub fn close(&mut self) -> Vec<Action> {
        let was_open = self.visible;
        self.visible = false;
        self.reset_transient();

        if was_open {
            tracing::debug!("closing file search dialog");
            vec![Action::HideDialog]
        } else {
            vec![]
        }
    }

    /// Flips visibility.
    pub fn toggle(&mut self) -> Vec<Action> {
        if self.visible {
            self.close()
        } else {
            self.open()
        }
    }

    fn reset_transient(&mut self) {
        if self.debouncer.cancel() {
            tracing::trace!("pending search cancelled");
        }
        self.sequencer.invalidate();
        self.query.clear();
        self.replace_results(vec![]);
    }

    fn replace_results(&mut self, results: Vec<FileEntry>) {
        self.results = results;
        self.selected_index = 0;
    }

    /// Applies a new query text.
    ///
    /// The query is stored immediately. A blank query clears results on the
    /// spot, cancels the pending timer and issues nothing; any other query
    /// (re)schedules the debounce timer. Ignored while the dialog is closed.
    pub fn on_query_changed(&mut self, new_text: impl Into<String>) -> Vec<Action> {
        if !self.visible {
            tracing::trace!("query change ignored while closed");
            return vec![];
        }

        self.query = new_text.into();
        tracing::trace!(query = %self.query, "search query updated");

        if self.query.trim().is_empty() {
            self.debouncer.cancel();
            self.sequencer.invalidate();
            self.replace_results(vec![]);
            return vec![];
        }

        self.debouncer.schedule();
        vec![Action::ArmTimer(self.debouncer.delay())]
    }

    /// Appends a typed character to the query.
    pub fn push_char(&mut self, c: char) -> Vec<Action> {
        let mut text = self.query.clone();
        text.push(c);
        self.on_query_changed(text)
    }

    /// Removes the last character of the query.
    pub fn pop_char(&mut self) -> Vec<Action> {
        let mut text = self.query.clone();
        if text.pop().is_none() {
            return vec![];
        }
        self.on_query_changed(text)
    }

    /// Handles one host timer event.
    ///
    /// Issues the search for the *current* query if the timer belongs to the
    /// live debounce ticket.
    pub fn on_timer(&mut self) -> Vec<Action> {
        if !self.debouncer.on_timer() {
            return vec![];
        }

        if !self.visible || self.query.trim().is_empty() {
            return vec![];
        }

        let request_id = self.sequencer.issue();
        let params = SearchRequestParams::for_query(self.query.clone());
        tracing::debug!(request_id = %request_id, query = %params.query, "issuing file search");

        vec![Action::PostToWorker(WorkerMessage::search_files(
            request_id,
            params,
            self.scope.clone(),
        ))]
    }

    /// Applies a successful search response if it is the latest request.
    ///
    /// Returns whether the results changed.
    pub fn on_search_completed(&mut self, request_id: RequestId, files: Vec<FileEntry>) -> bool {
        if !self.sequencer.accept(request_id) {
            return false;
        }
        tracing::debug!(request_id = %request_id, result_count = files.len(), "search results applied");
        self.replace_results(files);
        true
    }

    /// Applies a failed search as an empty result set if it is the latest request.
    pub fn on_search_failed(&mut self, request_id: RequestId, message: &str) -> bool {
        if !self.sequencer.accept(request_id) {
            return false;
        }
        tracing::warn!(request_id = %request_id, error = %message, "file search failed");
        self.replace_results(vec![]);
        true
    }

    /// Gives up on the in-flight request.
    ///
    /// A request that was in flight counts as failed, so its predecessor's
    /// results are cleared. Returns whether the results changed.
    pub fn abandon_pending_request(&mut self) -> bool {
        if self.sequencer.in_flight().is_none() {
            return false;
        }
        self.sequencer.invalidate();
        self.replace_results(vec![]);
        true
    }

    /// Selects `entry` and hands it off to the shell.
    ///
    /// Only valid while results are shown. Closes the dialog, then emits the
    /// file-to-open and panel activation actions exactly once.
    pub fn on_select(&mut self, entry: FileEntry) -> Vec<Action> {
        if !self.visible || self.results.is_empty() {
            tracing::debug!("selection ignored: no results");
            return vec![];
        }

        tracing::debug!(entry_id = %entry.id, path = %entry.path, "file selected");
        let panel = Panel::for_entry(&entry);

        let mut actions = self.close();
        actions.push(Action::SetFileToOpen(entry));
        actions.push(Action::OpenApplication(panel));
        actions
    }

    /// Selects the entry under the cursor.
    pub fn select_current(&mut self) -> Vec<Action> {
        match self.selected_entry().cloned() {
            Some(entry) => self.on_select(entry),
            None => vec![],
        }
    }

    /// The entry under the cursor, if any.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.results.get(self.selected_index)
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.results.len();
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = self
            .selected_index
            .checked_sub(1)
            .unwrap_or(self.results.len() - 1);
    }

    /// Computes the renderable view of the dialog.
    ///
    /// Placeholder policy: blank query shows [`TYPE_TO_SEARCH`], a query
    /// without results shows [`NO_FILES_FOUND`], otherwise the results are
    /// listed in backend order, windowed around the cursor.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let header = HeaderInfo {
            title: match self.phase() {
                DialogPhase::OpenSearching => format!(" Find File ({}) ", self.results.len()),
                _ => " Find File ".to_string(),
            },
        };
        let search_bar = SearchBarInfo {
            query: self.query.clone(),
            placeholder: "Search files...".to_string(),
        };
        let footer = self.compute_footer();

        let empty_state = if self.query.trim().is_empty() {
            Some(EmptyState { message: TYPE_TO_SEARCH.to_string() })
        } else if self.results.is_empty() {
            Some(EmptyState { message: NO_FILES_FOUND.to_string() })
        } else {
            None
        };

        if empty_state.is_some() {
            return UIViewModel {
                display_items: vec![],
                selected_index: 0,
                header,
                footer,
                empty_state,
                search_bar,
            };
        }

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.results.len());
        if visible_end - visible_start < available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = SkimMatcherV2::default().smart_case();
        let display_items = self.results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| self.compute_display_item(entry, visible_start + offset, cols, &matcher))
            .collect();

        UIViewModel {
            display_items,
            selected_index: self.selected_index - visible_start,
            header,
            footer,
            empty_state: None,
            search_bar,
        }
    }

    fn compute_display_item(&self, entry: &FileEntry, index: usize, cols: usize, matcher: &SkimMatcherV2) -> DisplayItem {
        use fuzzy_matcher::FuzzyMatcher;

        const NAME_COLUMN_WIDTH: usize = 37;

        let highlight_ranges = matcher
            .fuzzy_indices(&entry.name, self.query.trim())
            .map(|(_, indices)| coalesce_ranges(&indices))
            .unwrap_or_default();

        DisplayItem {
            name: truncate_end(&entry.name, NAME_COLUMN_WIDTH - 4),
            path: truncate_start(&entry.path, cols.saturating_sub(NAME_COLUMN_WIDTH + 2)),
            is_directory: entry.is_directory,
            is_selected: index == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let toggle = self
            .hotkeys
            .get_hotkey(HotkeyAction::FileSearch)
            .map(|hotkey| format!("  {}: toggle", hotkey.key))
            .unwrap_or_default();

        FooterInfo {
            keybindings: format!("Enter: open  Up/Down: navigate  Ctrl+u: clear  Esc: close{toggle}"),
        }
    }
}

/// Collapses sorted character indices into `(start, end)` runs (exclusive end).
fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

fn truncate_end(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn truncate_start(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().skip(len - max_chars.saturating_sub(3)).collect();
    format!("...{kept}")
}
