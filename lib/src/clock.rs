// lib/src/clock.rs

//! Time source for the stores. Production code uses the system clock; tests
//! pin "now" with a `ManualClock` so month boundaries and orderings are
//! deterministic.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock { current: Arc::new(Mutex::new(start)) }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// The timestamp to record for a modification of something last touched at
/// `previous`. Never returns a value at or before `previous`, even when the
/// clock has not ticked since.
pub fn next_update_timestamp(clock: &dyn Clock, previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = clock.now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let start = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start + Duration::minutes(5));

        let shared = clock.clone();
        shared.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn update_timestamp_is_strictly_increasing() {
        let start = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let next = next_update_timestamp(&clock, start);
        assert!(next > start);

        // A clock running behind the stored value must not move time backwards.
        let later = start + Duration::hours(1);
        assert!(next_update_timestamp(&clock, later) > later);

        clock.advance(Duration::hours(2));
        assert_eq!(next_update_timestamp(&clock, later), start + Duration::hours(2));
    }
}
