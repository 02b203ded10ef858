//! Chord buffer: turns a stream of key presses into 1- or 2-press sequences
//!
//! Only sequences of up to two presses are supported. The inactivity timer is
//! a deadline polled on the same event loop that delivers key events, so an
//! append and a timeout can never interleave.

use std::fmt;
use std::time::{Duration, Instant};

use super::error::KeymapError;
use super::types::KeyPress;

/// Default time to wait for the second key of a chord
pub const DEFAULT_CHORD_TIMEOUT: Duration = Duration::from_millis(5000);

/// Maximum number of presses in a sequence
pub const MAX_CHORD_DEPTH: usize = 2;

type TimeoutCallback = Box<dyn FnMut()>;

/// Holds at most one pending key press and its timeout deadline
pub struct ChordBuffer {
    pending: Option<KeyPress>,
    deadline: Option<Instant>,
    timeout: Duration,
    on_timeout: Option<TimeoutCallback>,
}

impl ChordBuffer {
    /// Create an empty buffer with the given timeout
    pub fn new(timeout: Duration) -> Result<Self, KeymapError> {
        validate_timeout(timeout)?;
        Ok(Self {
            pending: None,
            deadline: None,
            timeout,
            on_timeout: None,
        })
    }

    /// Add a key press and return the sequence formed so far
    ///
    /// The first press is stored and arms the timer; the second press returns
    /// `[pending, press]` and resets the buffer. An expired timer is fired
    /// first, so a late second key starts a fresh sequence.
    pub fn append(&mut self, press: KeyPress, now: Instant) -> Vec<KeyPress> {
        self.poll_timeout(now);

        match self.pending.take() {
            None => {
                self.pending = Some(press.clone());
                self.start_timeout(now);
                vec![press]
            }
            Some(first) => {
                self.clear();
                vec![first, press]
            }
        }
    }

    /// Drop any pending press and cancel the timer; idempotent
    pub fn clear(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// Fire the timeout if its deadline has been reached
    ///
    /// Runs the registered callback once and then resets like [`clear`](Self::clear).
    /// Returns whether the timeout fired.
    pub fn poll_timeout(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                tracing::debug!("Chord timed out after {}ms", self.timeout.as_millis());
                if let Some(callback) = self.on_timeout.as_mut() {
                    callback();
                }
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Register the callback run when a pending chord times out
    pub fn set_timeout_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_timeout = Some(Box::new(callback));
    }

    /// Change the timeout; takes effect for the next armed timer only
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<(), KeymapError> {
        validate_timeout(timeout)?;
        self.timeout = timeout;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The armed timer's deadline, for hosts that sleep until it
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn pending(&self) -> Option<&KeyPress> {
        self.pending.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn start_timeout(&mut self, now: Instant) {
        // Without a callback there is nothing to notify, so no timer is armed.
        if self.on_timeout.is_none() {
            return;
        }
        self.deadline = Some(now + self.timeout);
    }
}

impl Default for ChordBuffer {
    fn default() -> Self {
        Self {
            pending: None,
            deadline: None,
            timeout: DEFAULT_CHORD_TIMEOUT,
            on_timeout: None,
        }
    }
}

impl fmt::Debug for ChordBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChordBuffer")
            .field("pending", &self.pending)
            .field("deadline", &self.deadline)
            .field("timeout", &self.timeout)
            .field("has_callback", &self.on_timeout.is_some())
            .finish()
    }
}

fn validate_timeout(timeout: Duration) -> Result<(), KeymapError> {
    if timeout.is_zero() {
        return Err(KeymapError::InvalidTimeout(timeout));
    }
    Ok(())
}
