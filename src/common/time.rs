use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time for the countdown.
pub trait Clock {
    /// Milliseconds since the Unix epoch. Negative before the epoch.
    fn now_millis(&self) -> i64;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_millis() as i64,
            Err(e) => -(e.duration().as_millis() as i64),
        }
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
