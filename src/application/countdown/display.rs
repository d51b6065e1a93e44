use crate::common::error::Result;

/// Destination for rendered slot text.
pub trait DisplaySink {
    /// Replace the text shown in `slot`.
    fn set_text(&mut self, slot: &str, text: &str) -> Result<()>;

    /// Called once all slots of a tick are written.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<D: DisplaySink + ?Sized> DisplaySink for Box<D> {
    fn set_text(&mut self, slot: &str, text: &str) -> Result<()> {
        (**self).set_text(slot, text)
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }
}
