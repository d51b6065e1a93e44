pub mod event_loop;
pub mod poller;
pub mod scheduler;

pub use event_loop::EventLoop;
pub use poller::Poller;
pub use scheduler::{Scheduler, TimerId};
