use crate::application::config::models::{Config, SlotConfig};
use crate::core::event::scheduler::TimerId;

/// Everything one countdown needs between ticks. Built once at startup and
/// owned by whoever drives the [`Updater`](super::Updater).
#[derive(Debug, Clone)]
pub struct CountdownState {
    target_millis: i64,
    slots: SlotConfig,
    expired_message: String,
    timer: Option<TimerId>,
    expired: bool,
}

impl CountdownState {
    pub fn new(target_millis: i64, slots: SlotConfig, expired_message: impl Into<String>) -> Self {
        Self {
            target_millis,
            slots,
            expired_message: expired_message.into(),
            timer: None,
            expired: false,
        }
    }

    /// State for a countdown configured by `config`, started at `now_millis`.
    pub fn from_config(config: &Config, now_millis: i64) -> Self {
        Self::new(
            config.resolve_target(now_millis),
            config.slots.clone(),
            config.expired_message.clone(),
        )
    }

    pub fn target_millis(&self) -> i64 {
        self.target_millis
    }

    pub fn slots(&self) -> &SlotConfig {
        &self.slots
    }

    pub fn expired_message(&self) -> &str {
        &self.expired_message
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub(crate) fn set_timer(&mut self, id: TimerId) {
        self.timer = Some(id);
    }

    /// Flag the countdown as finished and hand back the timer to cancel.
    pub(crate) fn expire(&mut self) -> Option<TimerId> {
        self.expired = true;
        self.timer.take()
    }
}
