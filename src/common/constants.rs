pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_TARGET_OFFSET_DAYS: u64 = 6;
pub const DEFAULT_EXPIRED_MESSAGE: &str = "EXPIRED";

pub const MILLIS_PER_SECOND: i64 = 1000;
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

pub const DEFAULT_DAYS_SLOT: &str = "hari";
pub const DEFAULT_HOURS_SLOT: &str = "jam";
pub const DEFAULT_MINUTES_SLOT: &str = "menit";
pub const DEFAULT_SECONDS_SLOT: &str = "detik";
pub const DEFAULT_MESSAGE_SLOT: &str = "demo";

pub const MAX_POLL_EVENTS: usize = 16;
