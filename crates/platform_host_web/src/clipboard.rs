//! `navigator.clipboard` implementation of [`ClipboardService`].

use platform_host::{ClipboardFuture, ClipboardService};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Clipboard reader backed by the async Clipboard API.
pub struct WebClipboardService;

impl ClipboardService for WebClipboardService {
    fn read_text<'a>(&'a self) -> ClipboardFuture<'a, Result<String, String>> {
        Box::pin(bridge::read_clipboard_text())
    }
}
