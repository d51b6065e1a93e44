pub mod constants;
pub mod error;
pub mod logger;
pub mod time;

pub use error::{CountdownError, Result};
pub use logger::Logger;
pub use time::{Clock, SystemClock};
