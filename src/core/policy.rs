//! Monthly reset policy.
//!
//! Every employee gets [`DEFAULT_QUOTA`] gallons per calendar month. The reset is lazy:
//! it is applied the first time an employee's ledger is touched in a new month.
//! Everything here is pure.

use chrono::{Datelike, NaiveDate};

/// Quota granted at the start of every month and to newly registered employees.
pub const DEFAULT_QUOTA: i32 = 10;
/// Largest quota an administrator may assign.
pub const MAX_QUOTA: i32 = 50;
/// Largest number of gallons a single withdrawal may take.
pub const MAX_WITHDRAWAL: i32 = 10;
/// Maximum length of a scan code.
pub const MAX_SCAN_CODE_LEN: usize = 50;
/// Maximum length of an employee name.
pub const MAX_NAME_LEN: usize = 255;

/// State a ledger is restored to when a reset is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTarget {
    /// Quota after the reset
    pub quota: i32,
    /// First day of the month the reset belongs to
    pub reset_date: NaiveDate,
}

/// First calendar day of `date`'s month.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// True iff `last_reset` falls strictly before the first day of `today`'s month.
#[must_use]
pub fn is_reset_due(last_reset: NaiveDate, today: NaiveDate) -> bool {
    last_reset < first_of_month(today)
}

/// Ledger state after a reset performed on `today`.
#[must_use]
pub fn reset_target(today: NaiveDate) -> ResetTarget {
    ResetTarget {
        quota: DEFAULT_QUOTA,
        reset_date: first_of_month(today),
    }
}
