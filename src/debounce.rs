//! Caller-side coalescing of rapid input.
//!
//! The query engine has no notion of time. A front end schedules each
//! keystroke's query here and only runs the one that survives a quiet period;
//! older values are superseded and never produced. The clock is passed in so
//! the behavior can be tested without sleeping.

use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE_MS: u64 = 225;
pub const PREVIEW_DELAY_MS: u64 = 100;
pub const PREVIEW_EXIT_MS: u64 = 1000;

#[derive(Clone, Debug)]
pub struct Debounced<T> {
    pending: Option<(T, Instant)>,
    quiet: Duration,
}

impl<T> Debounced<T> {
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            pending: None,
            quiet: Duration::from_millis(quiet_ms),
        }
    }

    /// Replace any pending value and restart the quiet period.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will become ready, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.quiet)
    }

    /// Take the pending value once its quiet period has elapsed.
    pub fn take_ready(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, at)) if now.duration_since(at) >= self.quiet => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }
}
