pub mod models;
pub mod parser;
pub mod validator;
pub mod loader;

pub use models::{Config, DisplayMode, SlotConfig};
pub use loader::ConfigLoader;
