use crate::common::error::Result;
use std::fmt;
use std::time::Duration;

/// Handle for a repeating timer registered with a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedules repeating ticks and cancels them.
pub trait Scheduler {
    /// Register a timer that fires every `interval` until cancelled.
    fn schedule_repeating(&mut self, interval: Duration) -> Result<TimerId>;

    /// Stop a timer. Cancelling an unknown or already cancelled id does nothing.
    fn cancel(&mut self, id: TimerId);
}
