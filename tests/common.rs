// Shared fakes for driving the updater without a real clock, page or event loop

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use countdown::application::countdown::display::DisplaySink;
use countdown::common::error::{CountdownError, Result};
use countdown::common::time::Clock;
use countdown::core::event::scheduler::{Scheduler, TimerId};

/// Clock that only moves when told to
pub struct ManualClock {
    now: Cell<i64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

/// Clock that moves forward by `step` every time it is read
#[allow(dead_code)]
pub struct SteppingClock {
    now: Cell<i64>,
    step: i64,
}

#[allow(dead_code)]
impl SteppingClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> i64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// Display sink that records every write
#[derive(Default)]
pub struct RecordingDisplay {
    pub writes: Vec<(String, String)>,
    pub presents: usize,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes_to(&self, slot: &str) -> Vec<&str> {
        self.writes
            .iter()
            .filter(|(s, _)| s == slot)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn last(&self, slot: &str) -> Option<&str> {
        self.writes_to(slot).last().copied()
    }
}

impl DisplaySink for RecordingDisplay {
    fn set_text(&mut self, slot: &str, text: &str) -> Result<()> {
        self.writes.push((slot.to_string(), text.to_string()));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}

/// Display sink whose writes to one slot fail; every attempt is still recorded
#[allow(dead_code)]
pub struct FailingDisplay {
    pub failing_slot: String,
    pub attempts: Vec<(String, String)>,
}

#[allow(dead_code)]
impl FailingDisplay {
    pub fn new(failing_slot: &str) -> Self {
        Self {
            failing_slot: failing_slot.to_string(),
            attempts: Vec::new(),
        }
    }

    pub fn attempts_on(&self, slot: &str) -> usize {
        self.attempts.iter().filter(|(s, _)| s == slot).count()
    }
}

impl DisplaySink for FailingDisplay {
    fn set_text(&mut self, slot: &str, text: &str) -> Result<()> {
        self.attempts.push((slot.to_string(), text.to_string()));
        if slot == self.failing_slot {
            return Err(CountdownError::DisplayError(format!(
                "element '{}' is gone",
                slot
            )));
        }
        Ok(())
    }
}

/// Recording display that can be handed to a runner and inspected afterwards
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct SharedDisplay(pub Rc<RefCell<RecordingDisplay>>);

impl DisplaySink for SharedDisplay {
    fn set_text(&mut self, slot: &str, text: &str) -> Result<()> {
        self.0.borrow_mut().set_text(slot, text)
    }

    fn present(&mut self) -> Result<()> {
        self.0.borrow_mut().present()
    }
}

/// Scheduler that never fires, only records what was asked of it
#[derive(Default)]
pub struct RecordingScheduler {
    next_id: u64,
    pub scheduled: Vec<(TimerId, Duration)>,
    pub cancelled: Vec<TimerId>,
}

#[allow(dead_code)]
impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.scheduled.iter().any(|(s, _)| *s == id) && !self.cancelled.contains(&id)
    }
}

impl Scheduler for RecordingScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> Result<TimerId> {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.scheduled.push((id, interval));
        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) {
        self.cancelled.push(id);
    }
}
