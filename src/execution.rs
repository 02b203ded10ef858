//! Execution context handed to commands
//!
//! Owns the state commands act on (kill ring, condition context) and the
//! channel deferred commands report completion through.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::keymap::{ContextSchema, ContextState, ContextType};
use crate::kill_ring::{KillRing, LAST_ACTION_WAS_YANK};

/// Result reported by a deferred command
#[derive(Debug)]
pub struct Completion {
    pub command: String,
    pub result: anyhow::Result<()>,
}

/// Sendable handle a deferred command uses to report its outcome
#[derive(Debug, Clone)]
pub struct CompletionHandle {
    command: String,
    tx: Sender<Completion>,
}

impl CompletionHandle {
    /// Report the outcome; may be called from any thread
    pub fn finish(self, result: anyhow::Result<()>) {
        let completion = Completion {
            command: self.command,
            result,
        };
        if let Err(e) = self.tx.send(completion) {
            tracing::warn!("Completion for {} dropped: receiver gone", e.0.command);
        }
    }
}

#[derive(Debug)]
pub struct ExecutionContext {
    pub kill_ring: KillRing,
    pub context: ContextState,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
}

impl ExecutionContext {
    pub fn new(kill_ring_max_size: usize) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        let mut context = ContextState::new();
        context.declare(
            LAST_ACTION_WAS_YANK,
            ContextSchema::new(ContextType::Bool).describe("The previous command was a yank"),
        );

        Self {
            kill_ring: KillRing::new(kill_ring_max_size),
            context,
            completion_tx,
            completion_rx,
        }
    }

    /// Handle for a command that finishes after `execute` returns
    pub fn completion_handle(&self, command: impl Into<String>) -> CompletionHandle {
        CompletionHandle {
            command: command.into(),
            tx: self.completion_tx.clone(),
        }
    }

    /// Completions reported so far, without blocking
    pub fn drain_completions(&self) -> Vec<Completion> {
        self.completion_rx.try_iter().collect()
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(crate::kill_ring::DEFAULT_KILL_RING_SIZE)
    }
}
