use arboard::Clipboard;

use crate::error::{AppError, Result};

/// Destination for the confirmed path.
pub trait ClipboardSink {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard, reached through `arboard`.
///
/// The handle is dropped right after the write. On X11 without a
/// clipboard manager the contents go away when the process exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        Clipboard::new()
            .and_then(|mut cb| cb.set_text(text))
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}

/// Records writes in memory; optionally fails every write.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

#[cfg(test)]
impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(AppError::Clipboard("clipboard unavailable".into()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
