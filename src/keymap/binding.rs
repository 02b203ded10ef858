//! BindingEntry struct representing a mapping from a key sequence to a command

use super::canonical::canonicalize_sequence;
use super::types::{KeyPress, Priority};

/// Opaque parameters handed to a command when its binding fires
pub type Args = serde_json::Map<String, serde_json::Value>;

/// A single binding of a key sequence (1 or 2 presses) to a command id
#[derive(Debug, Clone, PartialEq)]
pub struct BindingEntry {
    /// The command to execute, e.g. `"editor:save"`
    pub command: String,
    /// The key sequence (usually 1, sometimes 2 for chords)
    pub sequence: Vec<KeyPress>,
    /// Condition that must hold for this binding to be eligible
    pub when: Option<String>,
    /// Parameters passed to the command
    pub args: Option<Args>,
    /// Source tier; the binding table overwrites this on insert
    pub priority: Priority,
}

impl BindingEntry {
    /// Create a single-press binding
    pub fn new(press: KeyPress, command: impl Into<String>) -> Self {
        Self::chord(vec![press], command)
    }

    /// Create a binding for a multi-press sequence
    pub fn chord(sequence: Vec<KeyPress>, command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            sequence,
            when: None,
            args: None,
            priority: Priority::Plugin,
        }
    }

    /// Add a condition to this binding (builder pattern)
    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.when = Some(condition.into());
        self
    }

    /// Attach command parameters (builder pattern)
    pub fn with_args(mut self, args: Args) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the priority tier (builder pattern)
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Canonical encoding of this binding's sequence
    pub fn canonical(&self) -> String {
        canonicalize_sequence(&self.sequence)
    }

    /// Storage key: canonical sequence plus command id
    pub fn composite_key(&self) -> String {
        format!("{}::{}", self.canonical(), self.command)
    }

    /// Check if this is a chord (multi-press) binding
    pub fn is_chord(&self) -> bool {
        self.sequence.len() > 1
    }
}
