use crate::common::constants::{
    DEFAULT_DAYS_SLOT, DEFAULT_EXPIRED_MESSAGE, DEFAULT_HOURS_SLOT, DEFAULT_MESSAGE_SLOT,
    DEFAULT_MINUTES_SLOT, DEFAULT_SECONDS_SLOT, DEFAULT_TARGET_OFFSET_DAYS,
    DEFAULT_TICK_INTERVAL_MS, MILLIS_PER_SECOND, SECONDS_PER_DAY,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Milliseconds between ticks
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Days from startup until the target moment
    #[serde(default = "default_target_offset_days")]
    pub target_offset_days: u64,

    /// Extra seconds added to the day offset
    #[serde(default)]
    pub target_offset_secs: u64,

    /// Absolute target in milliseconds since the Unix epoch (overrides offsets)
    #[serde(default)]
    pub target_epoch_ms: Option<i64>,

    /// Text written to the message slot on expiry
    #[serde(default = "default_expired_message")]
    pub expired_message: String,

    /// Where the countdown is rendered
    #[serde(default)]
    pub display: DisplayMode,

    /// HTML template for page mode (built-in page when absent)
    #[serde(default)]
    pub page_template: Option<String>,

    /// File the page is written to on every tick
    #[serde(default)]
    pub page_output: Option<String>,

    /// Display slot identifiers
    #[serde(default)]
    pub slots: SlotConfig,
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_target_offset_days() -> u64 {
    DEFAULT_TARGET_OFFSET_DAYS
}

fn default_expired_message() -> String {
    DEFAULT_EXPIRED_MESSAGE.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Terminal,
    Page,
}

/// Identifiers of the display slots
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlotConfig {
    #[serde(default = "default_days_slot")]
    pub days: String,

    #[serde(default = "default_hours_slot")]
    pub hours: String,

    #[serde(default = "default_minutes_slot")]
    pub minutes: String,

    #[serde(default = "default_seconds_slot")]
    pub seconds: String,

    /// Slot that receives the expiry message
    #[serde(default = "default_message_slot")]
    pub message: String,
}

fn default_days_slot() -> String {
    DEFAULT_DAYS_SLOT.to_string()
}

fn default_hours_slot() -> String {
    DEFAULT_HOURS_SLOT.to_string()
}

fn default_minutes_slot() -> String {
    DEFAULT_MINUTES_SLOT.to_string()
}

fn default_seconds_slot() -> String {
    DEFAULT_SECONDS_SLOT.to_string()
}

fn default_message_slot() -> String {
    DEFAULT_MESSAGE_SLOT.to_string()
}

impl SlotConfig {
    /// Numeric slots in days, hours, minutes, seconds order
    pub fn numeric(&self) -> [&str; 4] {
        [
            self.days.as_str(),
            self.hours.as_str(),
            self.minutes.as_str(),
            self.seconds.as_str(),
        ]
    }

    pub fn all(&self) -> [&str; 5] {
        let [days, hours, minutes, seconds] = self.numeric();
        [days, hours, minutes, seconds, self.message.as_str()]
    }
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Offset from startup to target, or `None` if it does not fit in i64 millis.
    pub fn target_offset_millis(&self) -> Option<i64> {
        let secs = self
            .target_offset_days
            .checked_mul(SECONDS_PER_DAY)?
            .checked_add(self.target_offset_secs)?;
        i64::try_from(secs).ok()?.checked_mul(MILLIS_PER_SECOND)
    }

    /// Target moment for a countdown started at `now_millis`.
    pub fn resolve_target(&self, now_millis: i64) -> i64 {
        match self.target_epoch_ms {
            Some(target) => target,
            None => now_millis.saturating_add(self.target_offset_millis().unwrap_or(i64::MAX)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            target_offset_days: default_target_offset_days(),
            target_offset_secs: 0,
            target_epoch_ms: None,
            expired_message: default_expired_message(),
            display: DisplayMode::default(),
            page_template: None,
            page_output: None,
            slots: SlotConfig::default(),
        }
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            days: default_days_slot(),
            hours: default_hours_slot(),
            minutes: default_minutes_slot(),
            seconds: default_seconds_slot(),
            message: default_message_slot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_is_six_days_out() {
        let config = Config::default();
        assert_eq!(config.target_offset_millis(), Some(6 * 86_400_000));
        assert_eq!(config.resolve_target(1_000), 1_000 + 518_400_000);
    }

    #[test]
    fn test_absolute_target_wins() {
        let config = Config {
            target_epoch_ms: Some(42),
            target_offset_secs: 90,
            ..Config::default()
        };
        assert_eq!(config.resolve_target(1_000_000), 42);
    }

    #[test]
    fn test_offset_overflow() {
        let config = Config {
            target_offset_days: u64::MAX,
            ..Config::default()
        };
        assert_eq!(config.target_offset_millis(), None);
        assert_eq!(config.resolve_target(0), i64::MAX);
    }

    #[test]
    fn test_slot_order() {
        let slots = SlotConfig::default();
        assert_eq!(slots.numeric(), ["hari", "jam", "menit", "detik"]);
        assert_eq!(slots.all()[4], "demo");
    }
}
