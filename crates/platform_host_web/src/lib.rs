//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Each adapter compiles on every target; outside `wasm32` they degrade to inert behavior so the
//! runtime and its tests build natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factories for runtime wiring.
pub mod adapters;
mod bridge;
pub mod clipboard;
pub mod external_url;
pub mod file_import;
pub mod storage;

pub use adapters::{
    build_host_services, clipboard_service, external_url_service, favicon_service,
    file_import_service, prefs_store,
};
pub use clipboard::WebClipboardService;
pub use external_url::WebExternalUrlService;
pub use file_import::WebFileImportService;
pub use storage::local_prefs::WebPrefsStore;
