//! Chorded keyboard mapping system
//!
//! This module turns single, uncorrelated key events into Emacs-style chords:
//! - Normalizes platform key events into canonical key presses
//! - Buffers up to two presses with an inactivity timeout
//! - Stores bindings from several sources in priority tiers (user > preset > plugin)
//! - Resolves sequences to a command, a pending prefix, or no match
//!
//! # Architecture
//!
//! ```text
//! winit::KeyEvent → RawKeyEvent → normalize() → KeyPress
//!     → ChordBuffer::append() → Matcher::match_sequence() → MatchResult
//!
//! BindingTable ──on_change──▶ Matcher::rebuild()
//! ```
//!
//! # Setting up
//!
//! ```ignore
//! let indicator = StatusIndicator::new();
//! let hotkeys = HotkeyContext::with_preset(DEFAULT_CHORD_TIMEOUT, indicator, &default_preset())?;
//! ```

mod binding;
mod canonical;
mod chord;
mod context;
mod defaults;
mod error;
mod hotkey_context;
mod matcher;
mod normalize;
mod status;
mod table;
mod types;
mod winit_adapter;

pub use binding::{Args, BindingEntry};
pub use canonical::{canonicalize_key_press, canonicalize_sequence, is_strict_prefix};
pub use chord::{ChordBuffer, DEFAULT_CHORD_TIMEOUT, MAX_CHORD_DEPTH};
pub use context::{
    AlwaysApplicable, ConditionEvaluator, ContextSchema, ContextState, ContextType, ContextValue,
    FlagConditions,
};
pub use defaults::{default_preset, preset_by_name, Preset, DEFAULT_PRESET};
pub use error::KeymapError;
pub use hotkey_context::{HotkeyContext, SharedDisplay};
pub use matcher::{MatchResult, Matcher};
pub use normalize::{normalize, RawKeyEvent};
pub use status::{PendingDisplay, StatusIndicator};
pub use table::BindingTable;
pub use types::{KeyCode, KeyPress, Modifiers, Priority};
pub use winit_adapter::raw_event_from_winit;
