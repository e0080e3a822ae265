//! fileseek: a Zellij plugin for incremental file search.
//!
//! A configurable chord toggles a floating picker. Typing fills the query;
//! after a 300 ms quiet period the query is sent to a background file index,
//! and only the response to the most recently issued request is shown.
//! Selecting an entry closes the picker and opens the entry in a viewer pane.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Shortcut listener, debouncer, sequencer          │
//! │  - Dialog state machine, event handling             │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────┐                       ┌───────────────┐
//! │ UI Layer      │                       │ Worker Layer  │
//! │ (ui/)         │                       │ (worker/)     │
//! │ - Rendering   │                       │ - File index  │
//! │ - Theming     │                       │ - IPC bridge  │
//! └───────────────┘                       └───────────────┘
//!         │                                       │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) · Infrastructure · Observability  │
//! └─────────────────────────────────────────────────────┘
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{FileEntry, FileSeekError, Result};
pub use ui::Theme;

use app::hotkeys::{HotkeyAction, HotkeyRegistry, DEFAULT_FILE_SEARCH_KEY};
use infrastructure::{expand_tilde, HOST_ROOT};
use std::collections::BTreeMap;
use worker::{SearchScope, DEFAULT_IGNORED_DIRS};

/// Viewer command used when none is configured.
pub const DEFAULT_VIEWER: &str = "less";

/// Plugin configuration from the KDL plugin block.
///
/// ```kdl
/// plugin location="file:/path/to/fileseek.wasm" {
///     search_root "~/code"
///     file_search_key "Alt f"
///     viewer "bat"
///     ignore ".git,target,dist"
///     theme "catppuccin-latte"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sandbox path the index walks from.
    pub search_root: String,

    /// Chord descriptor for `global.fileSearch`.
    pub file_search_key: String,

    /// Command the viewer panel runs with the selected file as argument.
    pub viewer: String,

    /// Directory names the walk never enters.
    pub ignore: Vec<String>,

    /// Built-in theme name. Ignored when `theme_file` is set.
    pub theme_name: Option<String>,

    /// Custom TOML theme file.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive, e.g. `debug` or `fileseek=trace`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_root: HOST_ROOT.to_string(),
            file_search_key: DEFAULT_FILE_SEARCH_KEY.to_string(),
            viewer: DEFAULT_VIEWER.to_string(),
            ignore: DEFAULT_IGNORED_DIRS.iter().map(ToString::to_string).collect(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads the configuration map Zellij hands to `load`.
    ///
    /// Missing or blank values fall back to the defaults. `ignore` is
    /// comma-separated; an explicitly empty `ignore ""` disables skipping.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use fileseek::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("search_root".to_string(), "~/code".to_string()),
    ///     ("ignore".to_string(), "target, dist".to_string()),
    /// ]);
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.search_root, "/host/code");
    /// assert_eq!(config.ignore, vec!["target", "dist"]);
    /// assert_eq!(config.file_search_key, "Ctrl p");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let ignore = config.get("ignore").map_or(defaults.ignore, |list| {
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect()
        });

        Self {
            search_root: non_blank("search_root").map_or(defaults.search_root, |root| expand_tilde(&root)),
            file_search_key: non_blank("file_search_key").unwrap_or(defaults.file_search_key),
            viewer: non_blank("viewer").unwrap_or(defaults.viewer),
            ignore,
            theme_name: non_blank("theme"),
            theme_file: non_blank("theme_file").map(|path| expand_tilde(&path)),
            trace_level: non_blank("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// The search scope sent with every request.
    #[must_use]
    pub fn scope(&self) -> SearchScope {
        SearchScope {
            root: self.search_root.clone(),
            ignore: self.ignore.clone(),
        }
    }

    /// Loads the configured theme, falling back to the default on any error.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial (closed) dialog state from the configuration.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(search_root = %config.search_root, key = %config.file_search_key, "initializing fileseek");

    let mut hotkeys = HotkeyRegistry::default();
    hotkeys.bind(HotkeyAction::FileSearch, config.file_search_key.clone());

    AppState::new(config.load_theme(), hotkeys, config.scope())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_fall_back_but_empty_ignore_disables_skipping() {
        let map = BTreeMap::from([
            ("viewer".to_string(), "   ".to_string()),
            ("ignore".to_string(), String::new()),
            ("trace_level".to_string(), "debug".to_string()),
        ]);
        let config = Config::from_zellij(&map);
        assert_eq!(config.viewer, DEFAULT_VIEWER);
        assert!(config.ignore.is_empty());
        assert_eq!(config.trace_level, "debug");
    }

    #[test]
    fn initialize_binds_the_configured_key() {
        let config = Config {
            file_search_key: "Alt f".to_string(),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);

        assert!(!state.is_open());
        assert_eq!(state.hotkeys.get_hotkey(HotkeyAction::FileSearch).unwrap().key, "Alt f");
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.scope, config.scope());
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, ui::theme::DEFAULT_THEME);
    }
}
