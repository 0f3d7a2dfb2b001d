//! Host service bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    ClipboardService, ExternalUrlService, FaviconService, FileImportService, NoopClipboardService,
    NoopExternalUrlService, NoopFileImportService, NoopPrefsStore, PrefsStore,
    ServiceFaviconResolver,
};

/// Runtime-selected collaborators for the desktop.
///
/// Environment-specific selection happens before this bundle reaches `desktop_runtime`, which
/// keeps the runtime free of browser adapter types.
#[derive(Clone)]
pub struct HostServices {
    /// Key-value store holding the desktop state blob and profile entries.
    pub prefs: Rc<dyn PrefsStore>,
    /// Favicon resolution for new shortcuts.
    pub favicons: Rc<dyn FaviconService>,
    /// Clipboard text reader for URL paste.
    pub clipboard: Rc<dyn ClipboardService>,
    /// Local file picker for image uploads.
    pub file_import: Rc<dyn FileImportService>,
    /// Opener for shortcut targets.
    pub external_urls: Rc<dyn ExternalUrlService>,
}

impl HostServices {
    /// Bundle with inert collaborators and the public favicon resolver.
    pub fn inert() -> Self {
        Self {
            prefs: Rc::new(NoopPrefsStore),
            favicons: Rc::new(ServiceFaviconResolver),
            clipboard: Rc::new(NoopClipboardService),
            file_import: Rc::new(NoopFileImportService),
            external_urls: Rc::new(NoopExternalUrlService),
        }
    }
}
