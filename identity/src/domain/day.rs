//! Calendar-day partitioning for salt rotation.

use std::fmt;

use chrono::{DateTime, Utc};
use mockable::Clock;

/// Milliseconds in one UTC day.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole UTC days elapsed since the Unix epoch.
///
/// Salt rotation is partitioned on this index: every identifier salted on
/// the same UTC day shares one salt, and the index advancing at midnight UTC
/// retires it. Computed as the floor of epoch milliseconds over
/// [`MILLIS_PER_DAY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayIndex(i64);

impl DayIndex {
    /// Day index containing the given instant.
    pub fn from_utc(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().div_euclid(MILLIS_PER_DAY))
    }

    /// Day index for the clock's current instant.
    pub fn current(clock: &dyn Clock) -> Self {
        Self::from_utc(clock.utc())
    }

    /// The following day.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw index value.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
