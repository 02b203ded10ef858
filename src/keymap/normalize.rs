//! Raw keydown events and their normalization into [`KeyPress`]

use super::types::{KeyCode, KeyPress, Modifiers};

/// A platform keydown event, before normalization
///
/// `key` is the logical key name as the platform reports it (`"x"`, `"X"`,
/// `" "`, `"Escape"`, `"Control"`), `code` the physical key identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key: String,
    pub code: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl RawKeyEvent {
    /// Create an event with no modifier flags set
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

/// Convert a raw event into a canonical key press
///
/// Modifiers come only from the event's flags. Printable characters are
/// lower-cased, so shift shows up in the modifier set and never as case, and
/// the space character becomes the `space` token. Total over its input.
pub fn normalize(event: &RawKeyEvent) -> KeyPress {
    KeyPress {
        key: KeyCode::from_name(&event.key),
        code: event.code.clone(),
        mods: Modifiers::new(event.ctrl, event.alt, event.shift, event.meta),
    }
}
