use anyhow::{Context, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// Where copied text goes.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. Kept alive for the whole session since some
/// platforms drop the contents together with the handle.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("Failed to open system clipboard")?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .context("Failed to write to clipboard")
    }
}

/// Keeps everything written to it; used when no system clipboard is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    history: Rc<RefCell<Vec<String>>>,
}

impl MemoryClipboard {
    #[cfg(test)]
    pub fn last(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.history.borrow_mut().push(text.to_string());
        Ok(())
    }
}
