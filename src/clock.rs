//! Source of "today" for every date-dependent computation

use chrono::{NaiveDate, Utc};

/// Supplies the current calendar date.
///
/// Services never read the system clock directly; they ask their `Clock`, so
/// tests can pin the date with [`FixedClock`].
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the UTC date from the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always returns the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
