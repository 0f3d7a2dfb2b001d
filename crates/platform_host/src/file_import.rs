//! Local file import contract for wallpaper, avatar, and item-icon uploads.
//!
//! The host reads a picked file into a data URI; the limits below decide whether the desktop
//! accepts it.

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

/// MIME types accepted for any image import.
pub const ACCEPTED_IMAGE_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "image/x-icon",
];

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// Object-safe boxed future used by [`FileImportService`].
pub type FileImportFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// What an imported image will be used for.
pub enum ImportKind {
    /// Desktop background.
    Wallpaper,
    /// User profile picture.
    Avatar,
    /// Custom icon for a shortcut or folder.
    ItemIcon,
}

impl ImportKind {
    /// Human label used in rejection messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wallpaper => "wallpaper",
            Self::Avatar => "avatar",
            Self::ItemIcon => "icon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A file read by the host, already encoded as a data URI.
pub struct ImportedFile {
    /// Original file name.
    pub name: String,
    /// Browser-reported MIME type. May be empty.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// `data:` URI holding the file contents.
    pub data_uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Per-kind size limits in bytes.
pub struct ImportLimits {
    /// Wallpaper size limit.
    pub wallpaper_max_bytes: u64,
    /// Avatar size limit.
    pub avatar_max_bytes: u64,
    /// Item icon size limit.
    pub item_icon_max_bytes: u64,
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            wallpaper_max_bytes: 8 * MIB,
            avatar_max_bytes: MIB,
            item_icon_max_bytes: 512 * KIB,
        }
    }
}

impl ImportLimits {
    /// Size limit for `kind`.
    pub const fn max_bytes(&self, kind: ImportKind) -> u64 {
        match kind {
            ImportKind::Wallpaper => self.wallpaper_max_bytes,
            ImportKind::Avatar => self.avatar_max_bytes,
            ImportKind::ItemIcon => self.item_icon_max_bytes,
        }
    }
}

/// Checks an imported file against the type allow-list and the size limit for `kind`.
///
/// # Errors
///
/// Returns a user-facing message describing why the file was rejected.
pub fn validate_import(
    kind: ImportKind,
    file: &ImportedFile,
    limits: &ImportLimits,
) -> Result<(), String> {
    let mime = file.mime_type.to_ascii_lowercase();
    if !ACCEPTED_IMAGE_MIME_TYPES.contains(&mime.as_str()) {
        return Err(format!(
            "`{}` is not a supported {} image.",
            file.name,
            kind.label()
        ));
    }
    if !file.data_uri.starts_with("data:") {
        return Err(format!("`{}` could not be read.", file.name));
    }
    let max = limits.max_bytes(kind);
    if file.size_bytes > max {
        return Err(format!(
            "`{}` is {} KiB; the {} limit is {} KiB.",
            file.name,
            file.size_bytes.div_ceil(KIB),
            kind.label(),
            max / KIB
        ));
    }
    Ok(())
}

/// Host service that lets the user pick one local file and reads it as a data URI.
pub trait FileImportService {
    /// Opens a picker filtered by `accept` (comma-separated MIME list).
    fn pick_file<'a>(
        &'a self,
        accept: &'a str,
    ) -> FileImportFuture<'a, Result<ImportedFile, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Import service for hosts without a file picker.
pub struct NoopFileImportService;

impl FileImportService for NoopFileImportService {
    fn pick_file<'a>(
        &'a self,
        _accept: &'a str,
    ) -> FileImportFuture<'a, Result<ImportedFile, String>> {
        Box::pin(async { Err("file import is unavailable on this host".to_string()) })
    }
}
