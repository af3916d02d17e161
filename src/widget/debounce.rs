//! Trailing-edge debouncer
//!
//! Rapid calls inside the delay window are coalesced: each call replaces
//! the pending value and restarts the timer, and only the last value is
//! released once the window elapses with no further calls. Time is passed
//! in explicitly so the host loop (and tests) own the clock.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a call at `now`, cancelling and restarting any pending timer
    pub fn call(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    /// Release the pending value if its window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(self.pending, Some((deadline, _)) if now >= deadline);
        if ready {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    /// When the pending call will fire, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
