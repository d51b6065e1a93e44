pub mod config;
pub mod countdown;
pub mod runner;
