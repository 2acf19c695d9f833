//! Time source used by every operation that needs "now" or "today".
//!
//! The monthly reset boundary depends on the calendar date, so operations take a
//! `&dyn Clock` instead of reading the system time directly.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current instant and calendar date.
pub trait Clock: Send + Sync {
    /// Current instant, used for `taken_at` and audit timestamps.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date, used for the monthly reset boundary.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock. Calendar dates follow the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always reports `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
