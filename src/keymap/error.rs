//! Errors raised by the keymap pipeline

use std::time::Duration;

/// Errors that can occur while building or running the hotkey pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    /// A binding sequence is empty or longer than the supported chord depth
    InvalidSequence(String),
    /// Priority selection was attempted on a group that filtered to nothing
    EmptyCandidates(String),
    /// The chord timeout must be a positive duration
    InvalidTimeout(Duration),
    /// A condition evaluator failed while filtering candidates
    Condition(String),
    Io(String),
    Parse(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::InvalidSequence(s) => write!(f, "Invalid key sequence: {}", s),
            KeymapError::EmptyCandidates(s) => {
                write!(f, "No candidates to select from for sequence: {}", s)
            }
            KeymapError::InvalidTimeout(d) => {
                write!(f, "Invalid chord timeout: {}ms (must be positive)", d.as_millis())
            }
            KeymapError::Condition(e) => write!(f, "Condition error: {}", e),
            KeymapError::Io(e) => write!(f, "IO error: {}", e),
            KeymapError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for KeymapError {}
