//! Cooperative search limits.
//!
//! Solvers poll a [`SearchBudget`] between branch expansions and once per
//! thousand or so orderings tried while sequencing a route. Nothing is interrupted
//! preemptively: an expired budget only stops the search from going further.

#[cfg(any(test, feature = "test-support"))]
use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared flag that asks a running search to stop.
///
/// # Examples
/// ```
/// use caravan_core::CancelFlag;
///
/// let flag = CancelFlag::default();
/// let handle = flag.clone();
/// handle.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Deadline and cancellation state for one solve invocation.
#[derive(Debug, Clone, Default)]
pub struct SearchBudget {
    deadline: Option<Instant>,
    cancel: Option<CancelFlag>,
    /// Polls left before the budget reports exhaustion.
    #[cfg(any(test, feature = "test-support"))]
    polls_left: Option<Cell<u64>>,
}

impl SearchBudget {
    /// A budget that never runs out.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            deadline: None,
            cancel: None,
            #[cfg(any(test, feature = "test-support"))]
            polls_left: None,
        }
    }

    /// Start the clock for an optional time limit measured from now.
    ///
    /// Limits too large to represent as an [`Instant`] are treated as no
    /// limit.
    #[must_use]
    pub fn starting_now(limit: Option<Duration>) -> Self {
        Self {
            deadline: limit.and_then(|limit| Instant::now().checked_add(limit)),
            ..Self::unlimited()
        }
    }

    /// Attach a cancellation flag.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Expire after `polls` calls to [`is_exhausted`](Self::is_exhausted)
    /// have answered `false`. Gives tests a clock-free way to stop a search
    /// at a chosen point.
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn with_poll_limit(mut self, polls: u64) -> Self {
        self.polls_left = Some(Cell::new(polls));
        self
    }

    /// Whether the search must stop expanding branches.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        #[cfg(any(test, feature = "test-support"))]
        if self.poll_limit_reached() {
            return true;
        }
        let cancelled = self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled);
        cancelled || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    #[cfg(any(test, feature = "test-support"))]
    fn poll_limit_reached(&self) -> bool {
        self.polls_left.as_ref().is_some_and(|left| {
            let remaining = left.get();
            left.set(remaining.saturating_sub(1));
            remaining == 0
        })
    }

    /// Whether the budget can ever run out.
    #[must_use]
    pub const fn is_limited(&self) -> bool {
        self.deadline.is_some() || self.cancel.is_some()
    }
}
