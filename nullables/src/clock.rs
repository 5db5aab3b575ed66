//! Nullable clock: deterministic time for testing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use x1_types::{Clock, ClockError, Timestamp};

/// A deterministic clock for testing.
///
/// Time only moves when you tell it to, and may be set backwards to exercise
/// clock regression. Thread-safe so it can sit behind a shared engine.
#[derive(Debug, Default)]
pub struct NullClock {
    current: AtomicU64,
    fail_next: AtomicBool,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: AtomicU64::new(initial_secs),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Current reading, ignoring any armed failure.
    pub fn peek(&self) -> Timestamp {
        Timestamp::new(self.current.load(Ordering::SeqCst))
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.fetch_add(secs, Ordering::SeqCst);
    }

    /// Advance time by whole days.
    pub fn advance_days(&self, days: u64) {
        self.advance(days * x1_types::SECS_PER_DAY);
    }

    /// Set the time to a specific value, earlier or later.
    pub fn set(&self, secs: u64) {
        self.current.store(secs, Ordering::SeqCst);
    }

    /// Make the next `now()` call return an error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl Clock for NullClock {
    fn now(&self) -> Result<Timestamp, ClockError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ClockError("null clock armed to fail".to_string()));
        }
        Ok(self.peek())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_and_regresses_on_demand() {
        let clock = NullClock::new(100);
        assert_eq!(clock.now().unwrap(), Timestamp::new(100));
        clock.advance(50);
        assert_eq!(clock.now().unwrap(), Timestamp::new(150));
        clock.advance_days(1);
        assert_eq!(clock.now().unwrap(), Timestamp::new(86_550));
        clock.set(10);
        assert_eq!(clock.now().unwrap(), Timestamp::new(10));
    }

    #[test]
    fn armed_failure_fires_once() {
        let clock = NullClock::new(7);
        clock.fail_next();
        assert!(clock.now().is_err());
        assert_eq!(clock.now().unwrap(), Timestamp::new(7));
    }
}
