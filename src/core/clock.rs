//! Time source abstraction
//!
//! The cache TTL and the date-phrase resolver both depend on "now". Injecting
//! the clock keeps them deterministic under test.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// A source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date at the given UTC offset (hours)
    ///
    /// Item dates in the store are calendar-day strings in campus-local time,
    /// so date filtering must use the same offset.
    fn today(&self, utc_offset_hours: i32) -> NaiveDate {
        let offset = FixedOffset::east_opt(utc_offset_hours * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
        self.now().with_timezone(&offset).date_naive()
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
