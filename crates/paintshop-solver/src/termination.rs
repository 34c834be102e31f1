//! Wall-clock budgets.

use std::time::{Duration, Instant};

/// Cooperative time budget measured from construction.
///
/// Controllers poll it once per iteration; nothing is interrupted mid-move.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use paintshop_solver::termination::TimeBudget;
///
/// let unlimited = TimeBudget::unlimited();
/// assert!(!unlimited.is_exceeded());
/// assert_eq!(unlimited.limit(), None);
///
/// let spent = TimeBudget::new(Some(Duration::ZERO));
/// assert!(spent.is_exceeded());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    limit: Option<Duration>,
}

impl TimeBudget {
    /// Starts the clock now.
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// True once the limit, if any, has been reached.
    pub fn is_exceeded(&self) -> bool {
        self.limit.is_some_and(|limit| self.elapsed() >= limit)
    }

    /// Fraction of the budget still available, in `[0, 1]`; `None` when
    /// unlimited.
    pub fn remaining_fraction(&self) -> Option<f64> {
        self.limit.map(|limit| {
            if limit.is_zero() {
                0.0
            } else {
                (1.0 - self.elapsed().as_secs_f64() / limit.as_secs_f64()).max(0.0)
            }
        })
    }
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}
