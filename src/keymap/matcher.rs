//! Matcher: resolves a key sequence against the registered bindings
//!
//! The index maps canonical sequences to the bindings that share them. It is
//! rebuilt from a full table snapshot on every table change and never edited
//! in place, so lookups always see one consistent snapshot.

use std::collections::HashMap;

use super::binding::BindingEntry;
use super::canonical::{canonicalize_sequence, is_strict_prefix};
use super::context::{ConditionEvaluator, ContextState};
use super::error::KeymapError;
use super::types::KeyPress;

/// Result of matching a sequence
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<'a> {
    /// Execute this binding
    Exact(&'a BindingEntry),
    /// The press starts a longer registered sequence, await more input
    Prefix,
    /// Nothing matched; `is_chord` is true for the second key of a chord
    None { is_chord: bool },
}

/// Read-optimized index over the binding table
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    index: HashMap<String, Vec<BindingEntry>>,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the index and regroup `entries` by canonical sequence
    ///
    /// Order within a group follows `entries`, which makes same-priority
    /// tie-breaks first-registered-wins.
    pub fn rebuild(&mut self, entries: &[BindingEntry]) {
        self.index.clear();
        for entry in entries {
            self.index
                .entry(entry.canonical())
                .or_default()
                .push(entry.clone());
        }
        tracing::debug!(
            "Rebuilt matcher index: {} bindings across {} sequences",
            entries.len(),
            self.index.len()
        );
    }

    /// Decide what `sequence` means given the current context
    pub fn match_sequence(
        &self,
        sequence: &[KeyPress],
        evaluator: &dyn ConditionEvaluator,
        context: &ContextState,
    ) -> Result<MatchResult<'_>, KeymapError> {
        let canonical = canonicalize_sequence(sequence);

        if let Some(group) = self.index.get(&canonical).filter(|g| !g.is_empty()) {
            let candidates = evaluator.filter_applicable(group, context)?;
            if !candidates.is_empty() {
                let entry = select_highest_priority(&canonical, &candidates)?;
                return Ok(MatchResult::Exact(entry));
            }
        }

        if sequence.len() == 1 && self.has_prefix(&canonical) {
            return Ok(MatchResult::Prefix);
        }

        Ok(MatchResult::None {
            is_chord: sequence.len() > 1,
        })
    }

    /// Whether the press is the escape key
    pub fn is_escape(&self, press: &KeyPress) -> bool {
        press.is_escape()
    }

    /// Bindings registered for a canonical sequence, in registration order
    pub fn bindings_for(&self, canonical: &str) -> &[BindingEntry] {
        self.index.get(canonical).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct canonical sequences indexed
    pub fn sequence_count(&self) -> usize {
        self.index.len()
    }

    fn has_prefix(&self, canonical: &str) -> bool {
        self.index.keys().any(|key| is_strict_prefix(canonical, key))
    }
}

/// Pick the candidate with the lowest priority value, first one on ties
fn select_highest_priority<'a>(
    canonical: &str,
    candidates: &[&'a BindingEntry],
) -> Result<&'a BindingEntry, KeymapError> {
    debug_assert!(
        !candidates.is_empty(),
        "priority selection on an empty candidate list"
    );

    let mut best: Option<&'a BindingEntry> = None;
    for &candidate in candidates {
        // Strict comparison keeps the earliest entry among equals
        match best {
            Some(b) if candidate.priority >= b.priority => {}
            _ => best = Some(candidate),
        }
    }
    best.ok_or_else(|| KeymapError::EmptyCandidates(canonical.to_string()))
}
