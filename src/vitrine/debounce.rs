//! # Debounce Scheduler
//!
//! Trailing-edge debounce for the pipeline trigger: rapid successive
//! filter edits (a dragged range slider, a burst of checkbox clicks)
//! collapse into one execution carrying the final state.
//!
//! The timer is clock-injected and poll-driven rather than thread-backed:
//! all mutation in this engine happens on one cooperative event loop, so
//! the owner calls [`Debouncer::poll`] from its tick and runs the pipeline
//! when it fires. `cancel` disarms a pending deadline, which the owner
//! must do on unmount so nothing executes after teardown.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arms (or re-arms) the deadline at `now + window`. A pending deadline
    /// is replaced, so only the last trigger in a burst survives.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Fires at most once per armed deadline, once it has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarms any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
