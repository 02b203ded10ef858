//! keychord - Emacs-style chorded hotkeys
//!
//! This crate turns raw keydown events into command dispatches, supporting
//! two-key chords with an inactivity timeout, prioritized binding sources and
//! conditional bindings.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod execution;
pub mod input;
pub mod keymap;
pub mod kill_ring;
pub mod tracing;

// Re-export commonly used types
pub use commands::{Command, CommandRegistry, Execution, FnCommand};
pub use config::Settings;
pub use execution::ExecutionContext;
pub use input::{InputHandler, KeyOutcome};
pub use kill_ring::KillRing;
