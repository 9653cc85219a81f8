//! Key bindings.
//!
//! A [`Binding`] pairs one or more key presses with the help text shown in the
//! footer. Panes keep their bindings in a key map struct and test incoming
//! [`KeyMsg`]s against them with [`Binding::matches`].
//!
//! ```rust
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//! use teatime::key::Binding;
//!
//! let start = Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "start/stop");
//! let msg = KeyMsg { key: KeyCode::Char(' '), modifiers: KeyModifiers::NONE };
//! assert!(start.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Modifiers that must be held. Empty means a plain press.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    /// Plain presses ignore shift so that terminals reporting `BackTab` with or
    /// without the shift flag behave the same. Control and alt never match a
    /// plain press.
    fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        if self.modifiers.is_empty() {
            return !msg
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        }
        msg.modifiers.contains(self.modifiers)
    }
}

/// Help text for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, such as `space`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// Key presses that trigger one action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding without help text.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            enabled: true,
        }
    }

    /// Sets the footer text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Footer text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding reacts to keys and shows in the footer. A binding
    /// without keys is never enabled.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// Turns the binding on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether `msg` is one of this binding's presses.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Returns true if any of the bindings match the key message.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}
