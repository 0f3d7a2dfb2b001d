//! Clipboard text contract and URL validation for pasted shortcut targets.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use url::Url;

/// Object-safe boxed future used by [`ClipboardService`].
pub type ClipboardFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service reading plain text from the system clipboard.
pub trait ClipboardService {
    /// Reads the current clipboard text.
    fn read_text<'a>(&'a self) -> ClipboardFuture<'a, Result<String, String>>;
}

/// Validates pasted text as an absolute URL and returns its normalized form.
///
/// # Errors
///
/// Returns a user-facing message when the text is not a well-formed absolute URL.
pub fn validate_clipboard_url(text: &str) -> Result<String, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("The clipboard is empty.".to_string());
    }
    Url::parse(trimmed)
        .map(|url| url.to_string())
        .map_err(|_| "The clipboard text is not a valid URL.".to_string())
}

#[derive(Debug, Clone, Copy, Default)]
/// Clipboard for hosts without clipboard access.
pub struct NoopClipboardService;

impl ClipboardService for NoopClipboardService {
    fn read_text<'a>(&'a self) -> ClipboardFuture<'a, Result<String, String>> {
        Box::pin(async { Err("clipboard is unavailable on this host".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory clipboard holding a single text value.
pub struct MemoryClipboardService {
    text: Rc<RefCell<Option<String>>>,
}

impl MemoryClipboardService {
    /// Replaces the clipboard contents.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = Some(text.into());
    }
}

impl ClipboardService for MemoryClipboardService {
    fn read_text<'a>(&'a self) -> ClipboardFuture<'a, Result<String, String>> {
        Box::pin(async move { Ok(self.text.borrow().clone().unwrap_or_default()) })
    }
}
