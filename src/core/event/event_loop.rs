// Single-threaded timer loop: timers are registered with the poller and
// delivered as readiness events
use crate::common::error::Result;
use crate::common::logger::Logger;
use crate::core::event::poller::Poller;
use crate::core::event::scheduler::{Scheduler, TimerId};
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

pub struct EventLoop {
    poller: Poller,
    timers: BTreeMap<TimerId, Duration>,
    pending: VecDeque<TimerId>,
    fired: Vec<u64>,
    next_id: u64,
}

impl EventLoop {
    pub fn new() -> Result<Self> {
        Ok(Self {
            poller: Poller::new()?,
            timers: BTreeMap::new(),
            pending: VecDeque::new(),
            fired: Vec::new(),
            next_id: 1,
        })
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Block until a timer fires and return its id. Returns `None` once every
    /// timer has been cancelled.
    pub fn next_fired(&mut self) -> Result<Option<TimerId>> {
        loop {
            // A timer cancelled by an earlier tick of the same batch is dropped here
            while let Some(id) = self.pending.pop_front() {
                if self.timers.contains_key(&id) {
                    return Ok(Some(id));
                }
            }

            if self.timers.is_empty() {
                return Ok(None);
            }

            self.fired.clear();
            self.poller.wait(&mut self.fired, -1)?;
            self.pending
                .extend(self.fired.iter().map(|&raw| TimerId(raw)));
        }
    }
}

impl Scheduler for EventLoop {
    fn schedule_repeating(&mut self, interval: Duration) -> Result<TimerId> {
        let id = TimerId(self.next_id);
        self.poller.add_timer(id.0, interval)?;
        self.next_id += 1;
        self.timers.insert(id, interval);
        Logger::debug(&format!("Scheduled {} every {:?}", id, interval));
        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) {
        if self.timers.remove(&id).is_none() {
            return;
        }
        if let Err(e) = self.poller.remove_timer(id.0) {
            Logger::warn(&format!("Failed to disarm {}: {}", id, e));
        }
        Logger::debug(&format!("Cancelled {}", id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_empty_loop_returns_none() {
        let mut event_loop = EventLoop::new().unwrap();
        assert!(!event_loop.has_timers());
        assert_eq!(event_loop.next_fired().unwrap(), None);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut event_loop = EventLoop::new().unwrap();
        assert!(event_loop.schedule_repeating(Duration::ZERO).is_err());
        assert!(!event_loop.has_timers());
    }

    #[test]
    fn test_timer_fires_after_interval() {
        let mut event_loop = EventLoop::new().unwrap();
        let start = Instant::now();
        let id = event_loop
            .schedule_repeating(Duration::from_millis(10))
            .unwrap();

        assert_eq!(event_loop.next_fired().unwrap(), Some(id));
        assert!(start.elapsed() >= Duration::from_millis(9));
        assert!(event_loop.is_scheduled(id));

        // Repeating: fires again without re-scheduling
        assert_eq!(event_loop.next_fired().unwrap(), Some(id));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut event_loop = EventLoop::new().unwrap();
        let id = event_loop
            .schedule_repeating(Duration::from_millis(5))
            .unwrap();
        event_loop.cancel(id);
        event_loop.cancel(id);
        assert_eq!(event_loop.next_fired().unwrap(), None);
    }

    #[test]
    fn test_faster_timer_fires_first() {
        let mut event_loop = EventLoop::new().unwrap();
        let slow = event_loop
            .schedule_repeating(Duration::from_millis(500))
            .unwrap();
        let fast = event_loop
            .schedule_repeating(Duration::from_millis(5))
            .unwrap();
        assert_ne!(slow, fast);

        assert_eq!(event_loop.next_fired().unwrap(), Some(fast));
        event_loop.cancel(fast);
        event_loop.cancel(slow);
        assert_eq!(event_loop.next_fired().unwrap(), None);
    }
}
