use crate::application::countdown::display::DisplaySink;
use crate::application::countdown::remaining::{remaining_millis, Remaining};
use crate::application::countdown::state::CountdownState;
use crate::common::constants::DEFAULT_TICK_INTERVAL_MS;
use crate::common::error::{CountdownError, Result};
use crate::common::logger::Logger;
use crate::common::time::Clock;
use crate::core::event::scheduler::{Scheduler, TimerId};
use std::time::Duration;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The four numeric slots were refreshed.
    Updated(Remaining),
    /// The target passed on this tick: timer cancelled, message written.
    Expired,
    /// Tick delivered after expiry; nothing was written.
    Idle,
}

/// Periodic display updater for one countdown.
#[derive(Debug, Clone, Copy)]
pub struct Updater {
    interval: Duration,
}

impl Updater {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Register the repeating tick. Starting an already running countdown
    /// returns the existing timer.
    pub fn start(&self, state: &mut CountdownState, scheduler: &mut dyn Scheduler) -> Result<TimerId> {
        if let Some(id) = state.timer() {
            return Ok(id);
        }
        if state.is_expired() {
            return Err(CountdownError::SchedulerError(
                "Countdown has already expired".to_string(),
            ));
        }

        let id = scheduler.schedule_repeating(self.interval)?;
        state.set_timer(id);
        Ok(id)
    }

    pub fn tick(
        &self,
        state: &mut CountdownState,
        clock: &dyn Clock,
        display: &mut dyn DisplaySink,
        scheduler: &mut dyn Scheduler,
    ) -> Result<TickOutcome> {
        if state.is_expired() {
            return Ok(TickOutcome::Idle);
        }

        let millis = remaining_millis(state.target_millis(), clock.now_millis());
        match Remaining::from_millis(millis) {
            Some(remaining) => {
                let [days, hours, minutes, seconds] = remaining.formatted();
                let slots = state.slots();
                display.set_text(&slots.days, &days)?;
                display.set_text(&slots.hours, &hours)?;
                display.set_text(&slots.minutes, &minutes)?;
                display.set_text(&slots.seconds, &seconds)?;
                display.present()?;
                Ok(TickOutcome::Updated(remaining))
            }
            None => {
                // Expire before writing so a failing sink cannot cause a second message
                if let Some(id) = state.expire() {
                    scheduler.cancel(id);
                }
                Logger::info(&format!("Countdown expired {} ms past target", millis.unsigned_abs()));
                display.set_text(&state.slots().message, state.expired_message())?;
                display.present()?;
                Ok(TickOutcome::Expired)
            }
        }
    }
}

impl Default for Updater {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TICK_INTERVAL_MS))
    }
}
