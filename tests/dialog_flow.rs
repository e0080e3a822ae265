//! End-to-end dialog scenarios driven through `handle_event`.
//!
//! `Host` plays the Zellij side: it fires armed timers in order, collects
//! posted worker requests, and records everything else the plugin asked for.

use fileseek::app::{DialogPhase, Panel, RequestId, NO_FILES_FOUND, TYPE_TO_SEARCH};
use fileseek::domain::FileEntry;
use fileseek::ui::render_to_string;
use fileseek::worker::{FileSeekWorker, SearchScope, WorkerMessage, WorkerResponse};
use fileseek::{handle_event, Action, AppState, Config, Event};
use std::collections::VecDeque;
use zellij_tile::prelude::{BareKey, KeyWithModifier};

#[derive(Default)]
struct Host {
    state: AppState,
    armed_timers: usize,
    requests: VecDeque<WorkerMessage>,
    effects: Vec<Action>,
    visible: bool,
}

impl Host {
    fn send(&mut self, event: Event) {
        let (_, actions) = handle_event(&mut self.state, &event).unwrap();
        for action in actions {
            match action {
                Action::ArmTimer(_) => self.armed_timers += 1,
                Action::PostToWorker(message) => self.requests.push_back(message),
                Action::ShowDialog => self.visible = true,
                Action::HideDialog => {
                    self.visible = false;
                    self.effects.push(Action::HideDialog);
                }
                other => self.effects.push(other),
            }
        }
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::Key(KeyWithModifier::new(BareKey::Char(c))));
        }
    }

    fn press(&mut self, key: KeyWithModifier) {
        self.send(Event::Key(key));
    }

    fn toggle_chord(&mut self) {
        self.press(KeyWithModifier::new(BareKey::Char('p')).with_ctrl_modifier());
    }

    /// Lets the debounce period elapse: every armed host timer fires.
    fn elapse(&mut self) {
        while self.armed_timers > 0 {
            self.armed_timers -= 1;
            self.send(Event::TimerFired);
        }
    }

    fn take_request(&mut self) -> (RequestId, String) {
        match self.requests.pop_front() {
            Some(WorkerMessage::SearchFiles { request_id, params, .. }) => (request_id, params.query),
            None => panic!("no search request was issued"),
        }
    }

    fn respond(&mut self, request_id: RequestId, files: Vec<FileEntry>) {
        self.send(Event::WorkerResponse(WorkerResponse::SearchCompleted { request_id, files }));
    }
}

fn main_py() -> FileEntry {
    FileEntry::new("1", "main.py", "/main.py", false)
}

#[test]
fn typing_a_query_then_selecting_hands_off_the_entry() {
    let mut host = Host::default();
    host.toggle_chord();
    host.type_text("main");
    host.elapse();

    let (id, query) = host.take_request();
    assert_eq!(query, "main");
    host.respond(id, vec![main_py()]);

    assert_eq!(host.state.results, vec![main_py()]);
    assert!(render_to_string(&host.state, 24, 80).contains("main.py"));

    host.press(KeyWithModifier::new(BareKey::Enter));
    assert_eq!(
        host.effects,
        vec![
            Action::HideDialog,
            Action::SetFileToOpen(main_py()),
            Action::OpenApplication(Panel::FileViewer),
        ]
    );
    assert!(!host.visible);
    assert!(host.state.query.is_empty());
    assert!(host.state.results.is_empty());
}

#[test]
fn a_burst_of_edits_issues_exactly_one_call_for_the_latest_query() {
    let mut host = Host::default();
    host.send(Event::Open);
    host.send(Event::QueryChanged("m".to_string()));
    host.send(Event::QueryChanged("ma".to_string()));
    host.send(Event::QueryChanged("main".to_string()));
    host.elapse();

    assert_eq!(host.requests.len(), 1);
    assert_eq!(host.take_request().1, "main");
}

#[test]
fn an_empty_response_shows_no_files_found() {
    let mut host = Host::default();
    host.send(Event::Open);
    host.type_text("xyz123notfound");
    host.elapse();

    let (id, _) = host.take_request();
    host.respond(id, vec![]);

    assert!(host.state.results.is_empty());
    assert!(render_to_string(&host.state, 24, 80).contains(NO_FILES_FOUND));
}

#[test]
fn clearing_before_the_debounce_elapses_issues_nothing() {
    let mut host = Host::default();
    host.send(Event::Open);
    host.type_text("a");
    host.send(Event::QueryChanged(String::new()));
    host.elapse();

    assert!(host.requests.is_empty());
    assert!(host.state.results.is_empty());
    assert_eq!(host.state.phase(), DialogPhase::OpenEmpty);
}

#[test]
fn toggling_closed_forgets_the_query_and_results() {
    let mut host = Host::default();
    host.toggle_chord();
    host.type_text("main");
    host.elapse();
    let (id, _) = host.take_request();
    host.respond(id, vec![main_py()]);

    host.toggle_chord();
    assert!(!host.visible);
    assert_eq!(host.state.phase(), DialogPhase::Closed);
    assert!(host.state.query.is_empty());
    assert!(host.state.results.is_empty());

    host.toggle_chord();
    assert!(host.visible);
    assert_eq!(host.state.phase(), DialogPhase::OpenEmpty);
    assert!(render_to_string(&host.state, 24, 80).contains(TYPE_TO_SEARCH));
}

#[test]
fn whitespace_queries_clear_results_synchronously() {
    for blank in ["", " ", "\t", "   \n"] {
        let mut host = Host::default();
        host.send(Event::Open);
        host.type_text("main");
        host.elapse();
        let (id, _) = host.take_request();
        host.respond(id, vec![main_py()]);

        host.send(Event::QueryChanged(blank.to_string()));
        assert!(host.state.results.is_empty());
        assert!(!host.state.search_scheduled());
        host.elapse();
        assert!(host.requests.is_empty());
    }
}

#[test]
fn a_late_response_for_an_older_query_is_never_shown() {
    let mut host = Host::default();
    host.send(Event::Open);
    host.type_text("ma");
    host.elapse();
    let (first, _) = host.take_request();

    host.type_text("in");
    host.elapse();
    let (second, query) = host.take_request();
    assert_eq!(query, "main");
    assert!(second > first);

    let newer = FileEntry::new("2", "main.rs", "/main.rs", false);
    host.respond(second, vec![newer.clone()]);
    host.respond(first, vec![FileEntry::new("3", "map.txt", "/map.txt", false)]);

    assert_eq!(host.state.results, vec![newer]);
}

#[test]
fn responses_after_close_do_not_repopulate_the_dialog() {
    let mut host = Host::default();
    host.send(Event::Open);
    host.type_text("main");
    host.elapse();
    let (id, _) = host.take_request();

    host.press(KeyWithModifier::new(BareKey::Esc));
    host.respond(id, vec![main_py()]);

    assert!(!host.state.is_open());
    assert!(host.state.results.is_empty());
}

#[test]
fn closing_mid_debounce_cancels_the_pending_search() {
    let mut host = Host::default();
    host.send(Event::Open);
    host.type_text("main");
    host.send(Event::Close);
    host.send(Event::Open);
    host.elapse();

    assert!(host.requests.is_empty());
}

#[test]
fn non_matching_keys_leave_visibility_alone() {
    let mut host = Host::default();
    host.press(KeyWithModifier::new(BareKey::Char('p')));
    host.press(KeyWithModifier::new(BareKey::Char('p')).with_alt_modifier());
    assert!(!host.state.is_open());

    host.toggle_chord();
    assert!(host.state.is_open());
    host.press(KeyWithModifier::new(BareKey::Char('p')).with_alt_modifier());
    assert!(host.state.is_open());
    assert!(host.state.query.is_empty());
}

#[test]
fn worker_backed_search_over_a_real_tree() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
    std::fs::write(dir.path().join("README.md"), "").unwrap();

    let config = Config {
        search_root: dir.path().to_string_lossy().into_owned(),
        ..Config::default()
    };
    let mut host = Host {
        state: fileseek::initialize(&config),
        ..Host::default()
    };
    let mut worker = FileSeekWorker::default();

    host.send(Event::Open);
    host.type_text("main");
    host.elapse();

    let request = host.requests.pop_front().unwrap();
    let WorkerMessage::SearchFiles { scope, .. } = &request;
    assert_eq!(scope, &SearchScope { root: config.search_root.clone(), ignore: config.ignore.clone() });

    let response = worker.handle_message(request);
    host.send(Event::WorkerResponse(response));

    assert_eq!(host.state.results.len(), 1);
    assert_eq!(host.state.results[0].name, "main.rs");
    assert!(!host.state.results[0].is_openable_in_editor);

    host.press(KeyWithModifier::new(BareKey::Enter));
    assert!(matches!(host.effects.last(), Some(Action::OpenApplication(Panel::FileViewer))));
}
