//! Hotkey configuration store.
//!
//! The registry maps action ids to raw chord descriptors. It never parses the
//! descriptors itself: the shortcut listener asks for the current binding on
//! every key event, so a rebind is picked up on the next keypress.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default chord for [`HotkeyAction::FileSearch`].
pub const DEFAULT_FILE_SEARCH_KEY: &str = "Ctrl p";

/// Actions that can be bound to a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HotkeyAction {
    /// Toggles the file search dialog.
    FileSearch,
}

impl HotkeyAction {
    /// Stable identifier used in configuration and pipe messages.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::FileSearch => "global.fileSearch",
        }
    }
}

impl fmt::Display for HotkeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HotkeyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "global.fileSearch" => Ok(Self::FileSearch),
            other => Err(format!("unknown hotkey action: {other}")),
        }
    }
}

/// A binding as stored in the registry.
///
/// `key` is an opaque chord descriptor such as `"Ctrl p"`; see
/// [`Chord::parse`](super::shortcut::Chord::parse) for the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    pub key: String,
}

/// Read-mostly store of action bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeyRegistry {
    bindings: BTreeMap<HotkeyAction, String>,
}

impl HotkeyRegistry {
    /// Creates a registry with the built-in default bindings.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.bind(HotkeyAction::FileSearch, DEFAULT_FILE_SEARCH_KEY);
        registry
    }

    /// Returns the current binding for `action`, if any.
    #[must_use]
    pub fn get_hotkey(&self, action: HotkeyAction) -> Option<Hotkey> {
        self.bindings
            .get(&action)
            .map(|key| Hotkey { key: key.clone() })
    }

    /// Replaces the binding for `action`.
    ///
    /// The descriptor is stored verbatim; an invalid descriptor simply never
    /// matches a key.
    pub fn bind(&mut self, action: HotkeyAction, key: impl Into<String>) {
        let key = key.into();
        tracing::debug!(action = %action, key = %key, "hotkey bound");
        self.bindings.insert(action, key);
    }

    /// Removes the binding for `action`.
    pub fn unbind(&mut self, action: HotkeyAction) {
        tracing::debug!(action = %action, "hotkey unbound");
        self.bindings.remove(&action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_file_search() {
        let registry = HotkeyRegistry::with_defaults();
        let hotkey = registry.get_hotkey(HotkeyAction::FileSearch).unwrap();
        assert_eq!(hotkey.key, DEFAULT_FILE_SEARCH_KEY);
    }

    #[test]
    fn rebinding_replaces_and_unbinding_removes() {
        let mut registry = HotkeyRegistry::with_defaults();
        registry.bind(HotkeyAction::FileSearch, "Alt f");
        assert_eq!(
            registry.get_hotkey(HotkeyAction::FileSearch),
            Some(Hotkey { key: "Alt f".to_string() })
        );

        registry.unbind(HotkeyAction::FileSearch);
        assert_eq!(registry.get_hotkey(HotkeyAction::FileSearch), None);
    }

    #[test]
    fn action_ids_round_trip() {
        let action: HotkeyAction = "global.fileSearch".parse().unwrap();
        assert_eq!(action, HotkeyAction::FileSearch);
        assert!("global.nope".parse::<HotkeyAction>().is_err());
    }
}
