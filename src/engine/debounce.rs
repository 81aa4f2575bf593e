//! Trailing-edge debouncer for search input.
//!
//! Each submitted query supersedes any pending one; a query only fires once
//! the delay window has elapsed with no newer submission. This is the only
//! cancellation primitive in the engine. Callers pass the clock in, so the
//! scheduling is deterministic and testable.

use std::time::{Duration, Instant};

/// Default delay window for canvas search boxes.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(250);

struct Pending {
    query: String,
    due: Instant,
}

/// Trailing-edge search debouncer.
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl SearchDebouncer {
    /// Create a debouncer with the given delay window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke's query at `now`, superseding any pending query
    /// and restarting the delay window.
    pub fn submit(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            query: query.into(),
            due: now + self.delay,
        });
    }

    /// Take the pending query if its delay window has elapsed by `now`.
    ///
    /// Returns the query at most once per submission.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.query),
            _ => None,
        }
    }

    /// Drop any pending query without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a query is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}
