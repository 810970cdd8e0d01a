//! Trailing debounce for free-text search input.
//!
//! Each keystroke replaces the pending value and restarts the window, so a
//! burst of typing commits at most once, with the last value typed. The
//! controller owns no timer task of its own; the session's event loop waits
//! on [`Debouncer::deadline`] instead, which makes cancellation on teardown a
//! non-event: dropping the controller drops the pending commit with it.

use std::time::Duration;
use tokio::time::Instant;

/// Window between the last keystroke and the search commit.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct PendingCommit {
    value: String,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<PendingCommit>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `value` for commit after the delay, measured from now.
    /// Replaces any previously pending value and restarts the window.
    pub fn schedule(&mut self, value: impl Into<String>) {
        self.pending = Some(PendingCommit {
            value: value.into(),
            deadline: Instant::now() + self.delay,
        });
    }

    /// Drop the pending commit, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline the owner should wait on, if a commit is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending value immediately (Enter key), regardless of the
    /// deadline.
    pub fn commit_now(&mut self) -> Option<String> {
        self.pending.take().map(|p| p.value)
    }

    /// Take the pending value if its deadline has passed.
    pub fn take_elapsed(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| p.deadline <= now) {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }
}
