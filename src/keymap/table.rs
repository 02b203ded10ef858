//! Binding table: the source of truth for registered bindings
//!
//! Entries are keyed by `(canonical sequence, command)`. Every mutation
//! synchronously notifies the registered listener with a snapshot of all
//! entries, in registration order.

use std::fmt;

use indexmap::IndexMap;

use super::binding::BindingEntry;
use super::chord::MAX_CHORD_DEPTH;
use super::error::KeymapError;
use super::types::Priority;

type ChangeListener = Box<dyn FnMut(&[BindingEntry])>;

/// Multi-source binding storage partitioned by priority tier
#[derive(Default)]
pub struct BindingTable {
    /// Insertion-ordered, so overwrites keep their slot and snapshots are stable
    entries: IndexMap<String, BindingEntry>,
    on_change: Option<ChangeListener>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listener notified after every mutation
    pub fn set_on_change(&mut self, listener: impl FnMut(&[BindingEntry]) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Store `entry` under its composite key with the given priority
    ///
    /// The table owns the priority: whatever the entry carried is replaced.
    /// Re-inserting the same sequence and command overwrites in place.
    pub fn insert(&mut self, entry: BindingEntry, priority: Priority) -> Result<(), KeymapError> {
        if entry.sequence.is_empty() || entry.sequence.len() > MAX_CHORD_DEPTH {
            return Err(KeymapError::InvalidSequence(format!(
                "{} ({} presses, expected 1..={})",
                entry.composite_key(),
                entry.sequence.len(),
                MAX_CHORD_DEPTH
            )));
        }

        let key = entry.composite_key();
        tracing::debug!("Binding {} at {} priority", key, priority);
        self.entries.insert(key, BindingEntry { priority, ..entry });
        self.notify();
        Ok(())
    }

    /// Delete by composite key; still notifies when nothing was removed
    pub fn remove(&mut self, entry: &BindingEntry) {
        let key = entry.composite_key();
        if self.entries.shift_remove(&key).is_none() {
            tracing::debug!("Remove of unknown binding {}", key);
        }
        self.notify();
    }

    /// Delete every entry of one tier, or everything when `priority` is `None`
    pub fn clear(&mut self, priority: Option<Priority>) {
        match priority {
            Some(priority) => self.entries.retain(|_, entry| entry.priority != priority),
            None => self.entries.clear(),
        }
        self.notify();
    }

    /// Snapshot of every entry; changes to it never reach the table
    pub fn get_all(&self) -> Vec<BindingEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn notify(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            let snapshot: Vec<BindingEntry> = self.entries.values().cloned().collect();
            listener(&snapshot);
        }
    }
}

impl fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingTable")
            .field("entries", &self.entries)
            .field("has_listener", &self.on_change.is_some())
            .finish()
    }
}
