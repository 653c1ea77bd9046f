//! Clock port — the injectable time source behind the countdown.
//!
//! The tick cadence itself lives in the composition root (a plain
//! `tokio::time::interval` task); what the application layer needs is the
//! *current time*, so that remaining seconds can be recomputed from the
//! absolute deadline on every tick instead of decrementing a drifting
//! counter. Injecting the clock also makes every transition deterministic
//! under test.

use std::sync::Mutex;

use chrono::TimeDelta;

use greenhub_domain::time::Timestamp;

/// Source of the current time.
pub trait Clock {
    /// The current UTC time.
    fn now(&self) -> Timestamp;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        greenhub_domain::time::now()
    }
}

/// Deterministic clock that only moves when told to.
///
/// Used by tests and simulations to drive the countdown one second at a
/// time.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    #[must_use]
    pub fn starting_at(instant: Timestamp) -> Self {
        Self {
            current: Mutex::new(instant),
        }
    }

    /// Advance the clock by whole seconds.
    pub fn advance_secs(&self, seconds: i64) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *current += TimeDelta::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<C: Clock> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        C::now(self)
    }
}
