pub mod countdown_runner;

pub use countdown_runner::{build_display, CountdownRunner};
