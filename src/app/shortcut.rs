//! Global shortcut recognition.
//!
//! The listener decides, for every key event the plugin receives, whether it is
//! the configured "toggle file search" chord. A matching key is consumed so it
//! never reaches the query input; anything else propagates to normal input
//! handling.
//!
//! # Chord Grammar
//!
//! Tokens are separated by whitespace or `+`, modifiers first, key last:
//!
//! ```text
//! Ctrl p        Alt+Shift f        Ctrl F5        Super Enter
//! ```
//!
//! Modifier names are case-insensitive (`Ctrl`/`Control`, `Alt`, `Shift`,
//! `Super`/`Cmd`/`Mod`). A descriptor that does not parse is not an error; it
//! simply never matches.

use super::hotkeys::{HotkeyAction, HotkeyRegistry};
use std::collections::BTreeSet;
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// A parsed key combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub key: BareKey,
    pub modifiers: BTreeSet<KeyModifier>,
}

impl Chord {
    /// Parses a chord descriptor.
    ///
    /// Returns `None` for empty descriptors, unknown modifier or key names,
    /// and descriptors naming more than one key.
    ///
    /// # Example
    ///
    /// ```
    /// use fileseek::app::shortcut::Chord;
    /// use zellij_tile::prelude::{BareKey, KeyModifier};
    ///
    /// let chord = Chord::parse("Ctrl+p").unwrap();
    /// assert_eq!(chord.key, BareKey::Char('p'));
    /// assert!(chord.modifiers.contains(&KeyModifier::Ctrl));
    /// assert!(Chord::parse("Hyper p").is_none());
    /// ```
    #[must_use]
    pub fn parse(descriptor: &str) -> Option<Self> {
        let tokens: Vec<&str> = descriptor
            .split(|c: char| c.is_whitespace() || c == '+')
            .filter(|t| !t.is_empty())
            .collect();

        let (key_token, modifier_tokens) = tokens.split_last()?;

        let modifiers = modifier_tokens
            .iter()
            .map(|t| parse_modifier(t))
            .collect::<Option<BTreeSet<_>>>()?;

        Some(Self {
            key: parse_bare_key(key_token)?,
            modifiers,
        })
    }

    /// Returns `true` when `key` has this chord's key and exactly its modifiers.
    #[must_use]
    pub fn matches(&self, key: &KeyWithModifier) -> bool {
        key.bare_key == self.key && key.key_modifiers == self.modifiers
    }
}

fn parse_modifier(token: &str) -> Option<KeyModifier> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(KeyModifier::Ctrl),
        "alt" => Some(KeyModifier::Alt),
        "shift" => Some(KeyModifier::Shift),
        "super" | "cmd" | "mod" => Some(KeyModifier::Super),
        _ => None,
    }
}

fn parse_bare_key(token: &str) -> Option<BareKey> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(BareKey::Char(c));
    }

    let lower = token.to_ascii_lowercase();
    let key = match lower.as_str() {
        "enter" | "return" => BareKey::Enter,
        "esc" | "escape" => BareKey::Esc,
        "tab" => BareKey::Tab,
        "backspace" => BareKey::Backspace,
        "delete" | "del" => BareKey::Delete,
        "insert" => BareKey::Insert,
        "home" => BareKey::Home,
        "end" => BareKey::End,
        "pageup" => BareKey::PageUp,
        "pagedown" => BareKey::PageDown,
        "up" => BareKey::Up,
        "down" => BareKey::Down,
        "left" => BareKey::Left,
        "right" => BareKey::Right,
        "space" => BareKey::Char(' '),
        _ => {
            let n: u8 = lower.strip_prefix('f')?.parse().ok()?;
            if (1..=12).contains(&n) {
                BareKey::F(n)
            } else {
                return None;
            }
        }
    };
    Some(key)
}

/// What the plugin should do with a key after the shortcut check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The key was the toggle chord: flip visibility, do not forward it.
    Toggle,
    /// Not a shortcut: hand the key to normal input handling.
    Propagate,
}

/// Recognizes the chord bound to one hotkey action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutListener {
    action: HotkeyAction,
}

impl Default for ShortcutListener {
    fn default() -> Self {
        Self::new(HotkeyAction::FileSearch)
    }
}

impl ShortcutListener {
    #[must_use]
    pub const fn new(action: HotkeyAction) -> Self {
        Self { action }
    }

    /// Classifies `key` against the action's *current* binding.
    ///
    /// The binding is looked up and parsed on every call, so changes to the
    /// registry apply to the next key without any restart.
    #[must_use]
    pub fn evaluate(&self, registry: &HotkeyRegistry, key: &KeyWithModifier) -> KeyDisposition {
        let matched = registry
            .get_hotkey(self.action)
            .and_then(|hotkey| Chord::parse(&hotkey.key))
            .is_some_and(|chord| chord.matches(key));

        if matched {
            tracing::debug!(action = %self.action, "shortcut matched");
            KeyDisposition::Toggle
        } else {
            KeyDisposition::Propagate
        }
    }
}
