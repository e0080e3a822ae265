//! Zellij plugin entry point.
//!
//! This shim owns the Zellij API surface: it translates host events and pipe
//! messages into [`Event`]s, feeds them to [`handle_event`], and executes the
//! returned [`Action`]s. All dialog logic lives in the library crate.
//!
//! # Triggers
//!
//! Zellij only forwards keys to a focused plugin, so the global chord is best
//! bound in the Zellij config as a pipe message:
//!
//! ```kdl
//! bind "Ctrl p" { MessagePlugin "fileseek" { name "toggle"; }; }
//! ```
//!
//! Recognised pipe names: `toggle`, `open`, `close`, and `rebind` (argument
//! `action`, payload = chord descriptor).

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use fileseek::app::{HotkeyAction, Panel};
use fileseek::domain::FileEntry;
use fileseek::infrastructure::HOST_ROOT;
use fileseek::worker::{FileSeekWorker, WorkerMessage, WorkerResponse};
use fileseek::{handle_event, Action, Config, Event};

register_plugin!(State);
register_worker!(FileSeekWorker, fileseek_worker, FILESEEK_WORKER);

/// Name the worker is registered under (`fileseek_worker` minus the suffix).
const WORKER_NAME: &str = "fileseek";

struct State {
    app: fileseek::AppState,

    /// Viewer command for [`Panel::FileViewer`].
    viewer: String,

    /// Entry stored by [`Action::SetFileToOpen`], consumed by the next panel activation.
    file_to_open: Option<FileEntry>,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: fileseek::initialize(&config),
            viewer: config.viewer,
            file_to_open: None,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        fileseek::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = fileseek::initialize(&config);
        self.viewer.clone_from(&config.viewer);

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::RunCommands,
            PermissionType::OpenFiles,
            PermissionType::OpenTerminalsOrPlugins,
            PermissionType::FullHdAccess,
            PermissionType::ReadCliPipes,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let span = tracing::debug_span!("plugin_update", event_type = %Self::event_name(&event));
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(key) => Event::Key(key),
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::TimerFired,
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Self::handle_permission_result(status);
                return false;
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        let span = tracing::debug_span!("plugin_pipe", name = %pipe_message.name);
        let _guard = span.entered();

        match Self::map_pipe_message(&pipe_message) {
            Some(event) => self.dispatch(&event),
            None => {
                tracing::debug!(name = %pipe_message.name, "ignoring unknown pipe message");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        fileseek::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(name, _) => format!("CustomMessage({name})"),
            zellij_tile::prelude::Event::PermissionRequestResult(_) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_pipe_message(message: &PipeMessage) -> Option<Event> {
        match message.name.as_str() {
            "toggle" => Some(Event::Toggle),
            "open" => Some(Event::Open),
            "close" => Some(Event::Close),
            "rebind" => {
                let action = match message.args.get("action").map(|id| id.parse::<HotkeyAction>()) {
                    Some(Ok(action)) => action,
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "rebind for unknown action");
                        return None;
                    }
                    None => HotkeyAction::FileSearch,
                };
                Some(Event::RebindHotkey {
                    action,
                    key: message.payload.clone().unwrap_or_default(),
                })
            }
            _ => None,
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn handle_permission_result(status: PermissionStatus) {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted");
                hide_self();
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - file search and opening unavailable");
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    /// Path of an entry relative to the host cwd, which is where `/host` is mounted.
    fn host_path(entry: &FileEntry) -> PathBuf {
        let relative = entry
            .id
            .strip_prefix(HOST_ROOT)
            .map(|rest| rest.trim_start_matches('/'))
            .filter(|rest| !rest.is_empty());

        PathBuf::from(relative.unwrap_or(entry.id.as_str()))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::ShowDialog => show_self(true),
            Action::HideDialog => hide_self(),
            Action::ArmTimer(delay) => set_timeout(delay.as_secs_f64()),
            Action::PostToWorker(message) => Self::post_worker_message(&message),
            Action::SetFileToOpen(entry) => self.file_to_open = Some(entry),
            Action::OpenApplication(panel) => self.open_panel(panel),
        }
    }

    fn open_panel(&mut self, panel: Panel) {
        let Some(entry) = self.file_to_open.take() else {
            tracing::debug!(panel = ?panel, "panel activated without a file to open");
            return;
        };
        let path = Self::host_path(&entry);
        tracing::debug!(panel = ?panel, path = %path.display(), "opening entry");

        match panel {
            Panel::Editor => open_file(FileToOpen::new(path), BTreeMap::new()),
            Panel::FileViewer if entry.is_directory => open_terminal_floating(path, None),
            Panel::FileViewer => open_command_pane_floating(
                CommandToRun::new_with_args(self.viewer.as_str(), vec![path.to_string_lossy().into_owned()]),
                None,
                BTreeMap::new(),
            ),
        }
    }
}
