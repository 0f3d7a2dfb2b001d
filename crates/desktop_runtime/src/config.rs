//! Static desktop configuration.

use platform_host::{ImportLimits, ACCEPTED_IMAGE_MIME_TYPES};

/// Wallpaper used on first boot and after clearing all data.
pub const DEFAULT_WALLPAPER: &str = "https://images.unsplash.com/photo-1477346611705-65d1883cee1e?auto=format&fit=crop&w=1920&q=80";

/// Wallpapers offered in the appearance picker, default first.
pub const PREDEFINED_WALLPAPERS: [&str; 4] = [
    DEFAULT_WALLPAPER,
    "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05?auto=format&fit=crop&w=1920&q=80",
    "https://images.unsplash.com/photo-1497436072909-60f360e1d4b1?auto=format&fit=crop&w=1920&q=80",
    "https://images.unsplash.com/photo-1426604966848-d7adac402bff?auto=format&fit=crop&w=1920&q=80",
];

/// Number of entries in the frequently-used list.
pub const DEFAULT_FREQUENT_ITEMS_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Runtime knobs shared by the host effect layer and derived queries.
pub struct DesktopConfig {
    pub default_wallpaper: String,
    pub predefined_wallpapers: Vec<String>,
    pub frequent_items_limit: usize,
    pub import_limits: ImportLimits,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            default_wallpaper: DEFAULT_WALLPAPER.to_string(),
            predefined_wallpapers: PREDEFINED_WALLPAPERS
                .iter()
                .map(|url| url.to_string())
                .collect(),
            frequent_items_limit: DEFAULT_FREQUENT_ITEMS_LIMIT,
            import_limits: ImportLimits::default(),
        }
    }
}

impl DesktopConfig {
    /// `accept` attribute passed to the host file picker.
    pub fn import_accept(&self) -> String {
        ACCEPTED_IMAGE_MIME_TYPES.join(",")
    }

    pub fn is_predefined_wallpaper(&self, wallpaper: &str) -> bool {
        self.predefined_wallpapers.iter().any(|w| w == wallpaper)
    }
}
