use crate::application::config::models::SlotConfig;
use crate::application::countdown::display::DisplaySink;
use crate::common::error::{CountdownError, Result};
use std::io::Write;

const PLACEHOLDER: &str = "--";

/// Renders the numeric slots as one self-overwriting terminal line and the
/// message slot on a line of its own.
pub struct TerminalDisplay<W: Write> {
    out: W,
    numeric: Vec<(String, String)>,
    message_slot: String,
    message: Option<String>,
    message_shown: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, slots: &SlotConfig) -> Self {
        let numeric = slots
            .numeric()
            .iter()
            .map(|name| (name.to_string(), PLACEHOLDER.to_string()))
            .collect();
        Self {
            out,
            numeric,
            message_slot: slots.message.clone(),
            message: None,
            message_shown: false,
        }
    }

    /// Current status line, e.g. `05 hari 23 jam 59 menit 58 detik`.
    pub fn status_line(&self) -> String {
        self.numeric
            .iter()
            .map(|(name, value)| format!("{} {}", value, name))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn text(&self, slot: &str) -> Option<&str> {
        if slot == self.message_slot {
            return self.message.as_deref();
        }
        self.numeric
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, value)| value.as_str())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn set_text(&mut self, slot: &str, text: &str) -> Result<()> {
        if slot == self.message_slot {
            self.message = Some(text.to_string());
            self.message_shown = false;
            return Ok(());
        }

        match self.numeric.iter_mut().find(|(name, _)| name == slot) {
            Some((_, value)) => {
                *value = text.to_string();
                Ok(())
            }
            None => Err(CountdownError::DisplayError(format!(
                "Unknown display slot '{}'",
                slot
            ))),
        }
    }

    fn present(&mut self) -> Result<()> {
        match self.message {
            Some(ref message) if !self.message_shown => {
                writeln!(self.out)?;
                writeln!(self.out, "{}", message)?;
                self.message_shown = true;
            }
            Some(_) => {}
            None => {
                let line = self.status_line();
                write!(self.out, "\r{}", line)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
