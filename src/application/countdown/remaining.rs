use crate::common::constants::{
    MILLIS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

/// Signed milliseconds from `now_millis` until `target_millis`.
pub fn remaining_millis(target_millis: i64, now_millis: i64) -> i64 {
    target_millis.saturating_sub(now_millis)
}

/// Non-negative remaining time split into display components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    /// Decompose a remaining span. Partial seconds are dropped; negative spans
    /// have no decomposition.
    pub fn from_millis(millis: i64) -> Option<Self> {
        if millis < 0 {
            return None;
        }
        Some(Self::from_seconds((millis / MILLIS_PER_SECOND) as u64))
    }

    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }

    /// Rendered components in days, hours, minutes, seconds order.
    pub fn formatted(&self) -> [String; 4] {
        [
            pad_two(self.days),
            pad_two(self.hours),
            pad_two(self.minutes),
            pad_two(self.seconds),
        ]
    }
}

/// Single digits get a leading zero, everything else is left as is.
pub fn pad_two(value: u64) -> String {
    if value < 10 {
        format!("0{}", value)
    } else {
        value.to_string()
    }
}
