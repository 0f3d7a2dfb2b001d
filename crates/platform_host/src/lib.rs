//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API boundary for every collaborator the desktop talks to outside its own
//! state: the key-value preference store, favicon resolution, clipboard text, local file import,
//! and external URL opening. Concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod clipboard;
pub mod external_url;
pub mod favicon;
pub mod file_import;
pub mod host;
pub mod storage;

pub use clipboard::{
    validate_clipboard_url, ClipboardFuture, ClipboardService, MemoryClipboardService,
    NoopClipboardService,
};
pub use external_url::{
    ExternalUrlFuture, ExternalUrlService, NoopExternalUrlService, RecordingExternalUrlService,
};
pub use favicon::{
    resolve_favicon_url, FaviconFuture, FaviconService, NoopFaviconService, ServiceFaviconResolver,
    DEFAULT_ICON_PATH,
};
pub use file_import::{
    validate_import, FileImportFuture, FileImportService, ImportKind, ImportLimits, ImportedFile,
    NoopFileImportService, ACCEPTED_IMAGE_MIME_TYPES,
};
pub use host::HostServices;
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
