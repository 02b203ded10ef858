//! Core types for the keymap system: KeyPress, Modifiers, KeyCode, Priority

use std::fmt;
use std::hash::{Hash, Hasher};

/// Modifier keys as a bitfield for efficient storage and comparison
///
/// The bit layout follows the canonical modifier order (ctrl, meta, alt, shift),
/// so two sets built in a different order are always identical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const META: Modifiers = Modifiers(0b0010); // Cmd on macOS, Win on Windows
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const SHIFT: Modifiers = Modifiers(0b1000);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= Self::CTRL.0;
        }
        if meta {
            bits |= Self::META.0;
        }
        if alt {
            bits |= Self::ALT.0;
        }
        if shift {
            bits |= Self::SHIFT.0;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.meta() {
            parts.push("Meta");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.shift() {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// The logical identity of a key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character key (normalized to lowercase)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F24

    // Modifier keys pressed on their own
    Control,
    Alt,
    Shift,
    Meta,

    /// Any other named key, kept verbatim
    Other(String),
}

impl KeyCode {
    /// Resolve a platform key name (`"Escape"`, `"ArrowUp"`, `"F5"`, `"x"`)
    ///
    /// Single characters are lower-cased and `" "` becomes [`KeyCode::Space`].
    /// Unknown names are kept as [`KeyCode::Other`], so this never fails.
    pub fn from_name(name: &str) -> KeyCode {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return if c == ' ' {
                KeyCode::Space
            } else {
                KeyCode::Char(c.to_lowercase().next().unwrap_or(c))
            };
        }

        match name {
            "Enter" => KeyCode::Enter,
            "Escape" | "Esc" => KeyCode::Escape,
            "Tab" => KeyCode::Tab,
            "Backspace" => KeyCode::Backspace,
            "Delete" => KeyCode::Delete,
            "space" | "Space" => KeyCode::Space,
            "ArrowUp" => KeyCode::Up,
            "ArrowDown" => KeyCode::Down,
            "ArrowLeft" => KeyCode::Left,
            "ArrowRight" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Insert" => KeyCode::Insert,
            "Control" => KeyCode::Control,
            "Alt" => KeyCode::Alt,
            "Shift" => KeyCode::Shift,
            "Meta" => KeyCode::Meta,
            _ => match name.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                Some(n) if (1..=24).contains(&n) => KeyCode::F(n),
                _ => KeyCode::Other(name.to_string()),
            },
        }
    }

    /// Whether this key is a bare modifier (ctrl/alt/shift/meta)
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            KeyCode::Control | KeyCode::Alt | KeyCode::Shift | KeyCode::Meta
        )
    }
}

/// Displays the key token used in canonical sequences
impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Space => write!(f, "space"),
            KeyCode::Up => write!(f, "ArrowUp"),
            KeyCode::Down => write!(f, "ArrowDown"),
            KeyCode::Left => write!(f, "ArrowLeft"),
            KeyCode::Right => write!(f, "ArrowRight"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Insert => write!(f, "Insert"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Control => write!(f, "Control"),
            KeyCode::Alt => write!(f, "Alt"),
            KeyCode::Shift => write!(f, "Shift"),
            KeyCode::Meta => write!(f, "Meta"),
            KeyCode::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A single normalized key press: key identity, physical code and modifiers
///
/// Equality and hashing ignore `code`: two presses are the same press when
/// their canonical encodings are equal.
#[derive(Clone, Debug)]
pub struct KeyPress {
    pub key: KeyCode,
    /// Physical key identifier reported by the platform (e.g. `"KeyX"`)
    pub code: String,
    pub mods: Modifiers,
}

impl KeyPress {
    /// Create a new key press with an empty physical code
    pub fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self {
            key,
            code: String::new(),
            mods,
        }
    }

    /// Create a key press with a character key and modifiers
    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self::new(KeyCode::Char(c.to_ascii_lowercase()), mods)
    }

    /// Create a key press with no modifiers
    pub fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Attach the physical key code (builder pattern)
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Whether this press is the escape key
    pub fn is_escape(&self) -> bool {
        self.key == KeyCode::Escape
    }
}

impl PartialEq for KeyPress {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.mods == other.mods
    }
}

impl Eq for KeyPress {}

impl Hash for KeyPress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.mods.hash(state);
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+{}", self.mods, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

/// Source tier of a binding; lower numeric value wins
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Priority {
    /// User overrides (highest)
    User = 0,
    /// Loaded preset
    Preset = 1,
    /// Defaults registered by plugins (lowest)
    Plugin = 2,
}

impl Priority {
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::User => write!(f, "user"),
            Priority::Preset => write!(f, "preset"),
            Priority::Plugin => write!(f, "plugin"),
        }
    }
}
