use std::rc::Rc;

use platform_host::{HostServices, ServiceFaviconResolver};

use crate::{WebClipboardService, WebExternalUrlService, WebFileImportService, WebPrefsStore};

/// Browser key-value store.
pub fn prefs_store() -> WebPrefsStore {
    WebPrefsStore
}

/// Favicon resolver used by the browser build.
pub fn favicon_service() -> ServiceFaviconResolver {
    ServiceFaviconResolver
}

/// Browser clipboard reader.
pub fn clipboard_service() -> WebClipboardService {
    WebClipboardService
}

/// Browser file picker.
pub fn file_import_service() -> WebFileImportService {
    WebFileImportService
}

/// Browser external URL opener.
pub fn external_url_service() -> WebExternalUrlService {
    WebExternalUrlService
}

/// Assembles the browser [`HostServices`] bundle injected into the desktop runtime.
pub fn build_host_services() -> HostServices {
    HostServices {
        prefs: Rc::new(prefs_store()),
        favicons: Rc::new(favicon_service()),
        clipboard: Rc::new(clipboard_service()),
        file_import: Rc::new(file_import_service()),
        external_urls: Rc::new(external_url_service()),
    }
}
