//! Shared test doubles.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock whose current instant tests can move forwards.
///
/// Lets salt-rotation and expiry tests cross day boundaries without
/// sleeping.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Create a clock pinned to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forwards by `delta`.
    ///
    /// # Panics
    ///
    /// Panics when `delta` does not fit in a [`TimeDelta`] or the inner
    /// mutex is poisoned. Both only occur under test misuse.
    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => panic!("duration out of range for clock advance: {error}"),
        };
        *self.lock_instant() += delta;
    }

    /// Move the clock forwards by whole days.
    ///
    /// # Panics
    ///
    /// Panics when the inner mutex is poisoned.
    pub fn advance_days(&self, days: i64) {
        *self.lock_instant() += TimeDelta::days(days);
    }

    fn lock_instant(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex poisoned"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_instant()
    }
}
