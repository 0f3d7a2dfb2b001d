//! Favicon resolution contract.
//!
//! Resolution never fails past this boundary: malformed URLs and unreachable hosts both resolve
//! to [`DEFAULT_ICON_PATH`].

use std::{future::Future, pin::Pin};

use url::Url;

/// Icon used whenever a favicon cannot be derived for a URL.
pub const DEFAULT_ICON_PATH: &str = "/default-icon.png";

const FAVICON_SERVICE_BASE: &str = "https://www.google.com/s2/favicons";
const FAVICON_SIZE_PX: u32 = 64;

/// Object-safe boxed future used by [`FaviconService`].
pub type FaviconFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service resolving an icon URI for a shortcut target.
pub trait FaviconService {
    /// Resolves an icon URI for `url`. Always yields a usable URI.
    fn resolve<'a>(&'a self, url: &'a str) -> FaviconFuture<'a, String>;
}

/// Builds the favicon-service URI for `url`, or [`DEFAULT_ICON_PATH`] when `url` has no host.
pub fn resolve_favicon_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return DEFAULT_ICON_PATH.to_string();
    };
    match parsed.host_str() {
        Some(domain) if !domain.is_empty() => {
            format!("{FAVICON_SERVICE_BASE}?domain={domain}&sz={FAVICON_SIZE_PX}")
        }
        _ => DEFAULT_ICON_PATH.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Resolver that points every shortcut at the public favicon service for its domain.
pub struct ServiceFaviconResolver;

impl FaviconService for ServiceFaviconResolver {
    fn resolve<'a>(&'a self, url: &'a str) -> FaviconFuture<'a, String> {
        Box::pin(async move { resolve_favicon_url(url) })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Resolver that always answers with the default icon.
pub struct NoopFaviconService;

impl FaviconService for NoopFaviconService {
    fn resolve<'a>(&'a self, _url: &'a str) -> FaviconFuture<'a, String> {
        Box::pin(async { DEFAULT_ICON_PATH.to_string() })
    }
}
