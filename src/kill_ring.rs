//! Kill ring: killed text history with yank cycling
//!
//! Entries are newest first. `yank` returns the head; `yank_pop` walks back
//! through older entries, but only while the previous command was a yank.

use std::collections::VecDeque;
use std::ops::Range;

use crate::commands::names;
use crate::keymap::ContextState;

/// Context key recording whether the last dispatched command was a yank
pub const LAST_ACTION_WAS_YANK: &str = "lastActionWasYank";

/// Default number of entries kept
pub const DEFAULT_KILL_RING_SIZE: usize = 60;

#[derive(Debug, Clone)]
pub struct KillRing {
    entries: VecDeque<String>,
    max_size: usize,
    yank_pointer: usize,
    /// Range of the text inserted by the last yank, for yank-pop replacement
    last_yank_range: Option<Range<usize>>,
}

impl KillRing {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size: max_size.max(1),
            yank_pointer: 0,
            last_yank_range: None,
        }
    }

    /// Add killed text at the head; empty text is ignored
    pub fn push(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }

        self.entries.push_front(text);
        self.entries.truncate(self.max_size);
        self.yank_pointer = 0;
    }

    /// Most recent entry; restarts yank cycling
    pub fn yank(&mut self) -> Option<&str> {
        self.yank_pointer = 0;
        self.entries.front().map(String::as_str)
    }

    /// Next older entry, wrapping around
    ///
    /// Returns `None` unless the last action was a yank.
    pub fn yank_pop(&mut self, context: &ContextState) -> Option<&str> {
        if !context.is_set(LAST_ACTION_WAS_YANK) || self.entries.is_empty() {
            return None;
        }

        self.yank_pointer = (self.yank_pointer + 1) % self.entries.len();
        self.entries.get(self.yank_pointer).map(String::as_str)
    }

    pub fn set_yank_range(&mut self, range: Range<usize>) {
        self.last_yank_range = Some(range);
    }

    pub fn yank_range(&self) -> Option<Range<usize>> {
        self.last_yank_range.clone()
    }

    /// Record whether `command` continues a yank sequence
    ///
    /// True after a yank, or after a yank-pop that itself follows a yank.
    /// Anything else ends the sequence and resets the cycling state.
    pub fn update_last_action_was_yank(&mut self, command: &str, context: &mut ContextState) {
        let is_yank = command == names::YANK;
        let is_pop_after_yank =
            command == names::YANK_POP && context.is_set(LAST_ACTION_WAS_YANK);
        let continues = is_yank || is_pop_after_yank;

        context.set(LAST_ACTION_WAS_YANK, continues);

        if !continues {
            self.yank_pointer = 0;
            self.last_yank_range = None;
        }
    }

    /// All entries, newest first
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Change the capacity, dropping the oldest entries if needed
    pub fn set_max_size(&mut self, size: usize) {
        self.max_size = size.max(1);
        self.entries.truncate(self.max_size);
        if self.yank_pointer >= self.entries.len() {
            self.yank_pointer = 0;
        }
    }
}

impl Default for KillRing {
    fn default() -> Self {
        Self::new(DEFAULT_KILL_RING_SIZE)
    }
}
