pub mod display;
pub mod page_display;
pub mod remaining;
pub mod state;
pub mod terminal_display;
pub mod updater;

pub use display::DisplaySink;
pub use page_display::PageDisplay;
pub use remaining::{pad_two, remaining_millis, Remaining};
pub use state::CountdownState;
pub use terminal_display::TerminalDisplay;
pub use updater::{TickOutcome, Updater};
