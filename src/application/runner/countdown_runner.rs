use crate::application::config::models::{Config, DisplayMode};
use crate::application::config::validator::validate_config;
use crate::application::countdown::display::DisplaySink;
use crate::application::countdown::page_display::PageDisplay;
use crate::application::countdown::remaining::{remaining_millis, Remaining};
use crate::application::countdown::state::CountdownState;
use crate::application::countdown::terminal_display::TerminalDisplay;
use crate::application::countdown::updater::{TickOutcome, Updater};
use crate::common::error::Result;
use crate::common::logger::Logger;
use crate::common::time::{Clock, SystemClock};
use crate::core::event::event_loop::EventLoop;
use crate::core::event::scheduler::Scheduler;
use std::io;
use std::path::{Path, PathBuf};

/// Drives one countdown from the event loop until it expires
pub struct CountdownRunner<C: Clock = SystemClock> {
    clock: C,
    state: CountdownState,
    updater: Updater,
    event_loop: EventLoop,
    display: Box<dyn DisplaySink>,
}

impl CountdownRunner<SystemClock> {
    /// Create a runner on the system clock with the display chosen by `config`
    pub fn new(config: Config) -> Result<Self> {
        validate_config(&config)?;
        let display = build_display(&config)?;
        Self::assemble(config, SystemClock, display)
    }
}

impl<C: Clock> CountdownRunner<C> {
    /// Create a runner with an explicit clock and display sink. The target is
    /// fixed here, from the clock's current time.
    pub fn with_parts(config: Config, clock: C, display: Box<dyn DisplaySink>) -> Result<Self> {
        validate_config(&config)?;
        Self::assemble(config, clock, display)
    }

    fn assemble(config: Config, clock: C, display: Box<dyn DisplaySink>) -> Result<Self> {
        let state = CountdownState::from_config(&config, clock.now_millis());
        Ok(Self {
            clock,
            state,
            updater: Updater::new(config.tick_interval()),
            event_loop: EventLoop::new()?,
            display,
        })
    }

    pub fn state(&self) -> &CountdownState {
        &self.state
    }

    pub fn print_info(&self) {
        let millis = remaining_millis(self.state.target_millis(), self.clock.now_millis());
        let remaining = match Remaining::from_millis(millis) {
            Some(r) => format!("{}d {}h {}m {}s", r.days, r.hours, r.minutes, r.seconds),
            None => "already passed".to_string(),
        };
        Logger::info(&format!(
            "Counting down to {} ms since epoch ({}), ticking every {:?}",
            self.state.target_millis(),
            remaining,
            self.updater.interval()
        ));
    }

    /// Run until the countdown has expired and its timer is cancelled
    pub fn run(&mut self) -> Result<()> {
        self.updater.start(&mut self.state, &mut self.event_loop)?;

        while let Some(id) = self.event_loop.next_fired()? {
            if self.state.timer() != Some(id) {
                Logger::warn(&format!("Dropping unowned {}", id));
                self.event_loop.cancel(id);
                continue;
            }

            let outcome = self
                .updater
                .tick(
                    &mut self.state,
                    &self.clock,
                    self.display.as_mut(),
                    &mut self.event_loop,
                )
                .map_err(|e| {
                    Logger::error(&format!("Tick failed: {}", e));
                    e
                })?;

            if outcome == TickOutcome::Expired {
                Logger::debug("Countdown finished, leaving event loop");
            }
        }

        Ok(())
    }
}

/// Display sink selected by the configuration
pub fn build_display(config: &Config) -> Result<Box<dyn DisplaySink>> {
    match config.display {
        DisplayMode::Terminal => Ok(Box::new(TerminalDisplay::new(io::stdout(), &config.slots))),
        DisplayMode::Page => {
            let output = config.page_output.as_ref().map(PathBuf::from);
            let page = match config.page_template {
                Some(ref template) => PageDisplay::from_template_file(Path::new(template), output)?,
                None => PageDisplay::with_default_page(&config.slots, output),
            };
            Ok(Box::new(page))
        }
    }
}
