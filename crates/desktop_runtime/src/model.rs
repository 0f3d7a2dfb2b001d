use platform_host::ImportKind;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::config::DEFAULT_WALLPAPER;

pub const DESKTOP_STATE_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_FOLDER_TITLE: &str = "New Folder";
pub const DEFAULT_USER_NAME: &str = "User";

/// Opaque, globally unique item identifier. Generated once at creation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Shortcut { target_url: String },
    Folder { children: Vec<DesktopItem> },
}

/// A desktop entry: either a shortcut leaf or a folder of further entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopItem {
    pub id: ItemId,
    pub title: String,
    /// Icon URI. Empty until one is chosen or resolved.
    pub icon: String,
    pub usage_count: u32,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl DesktopItem {
    pub fn shortcut(
        title: impl Into<String>,
        target_url: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            title: title.into(),
            icon: icon.into(),
            usage_count: 0,
            kind: ItemKind::Shortcut {
                target_url: target_url.into(),
            },
        }
    }

    pub fn folder(title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            title: title.into(),
            icon: icon.into(),
            usage_count: 0,
            kind: ItemKind::Folder {
                children: Vec::new(),
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder { .. })
    }

    pub fn children(&self) -> Option<&[DesktopItem]> {
        match &self.kind {
            ItemKind::Folder { children } => Some(children),
            ItemKind::Shortcut { .. } => None,
        }
    }

    pub fn target_url(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Shortcut { target_url } => Some(target_url),
            ItemKind::Folder { .. } => None,
        }
    }

    /// Copies this item's metadata over a new child list. Meaningless for shortcuts, which are
    /// returned unchanged.
    pub(crate) fn with_children(&self, children: Vec<DesktopItem>) -> Self {
        match self.kind {
            ItemKind::Folder { .. } => Self {
                id: self.id.clone(),
                title: self.title.clone(),
                icon: self.icon.clone(),
                usage_count: self.usage_count,
                kind: ItemKind::Folder { children },
            },
            ItemKind::Shortcut { .. } => self.clone(),
        }
    }
}

/// Partial edit for an item. Absent fields are left as they are.
///
/// A patch never touches `id` or a folder's children; `target_url` is ignored for folders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub target_url: Option<String>,
    pub usage_count: Option<u32>,
}

impl ItemPatch {
    pub fn icon(icon: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(&self, item: &mut DesktopItem) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(icon) = &self.icon {
            item.icon = icon.clone();
        }
        if let Some(usage_count) = self.usage_count {
            item.usage_count = usage_count;
        }
        if let (Some(url), ItemKind::Shortcut { target_url }) = (&self.target_url, &mut item.kind) {
            *target_url = url.clone();
        }
    }
}

/// Suggests a shortcut title from its URL: the host without `www.`, first letter upper-cased.
pub fn suggest_shortcut_title(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    let domain = host.strip_prefix("www.").unwrap_or(host);
    let mut chars = domain.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    pub id: ItemId,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    OpenActive,
    OpenInactive,
    Minimized,
}

/// An open window onto a folder.
///
/// `view_id` is the folder the window was opened on; `breadcrumb` starts at that folder and ends
/// at the folder currently displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderView {
    pub view_id: ItemId,
    /// Taskbar title, refreshed from the root folder on every sync.
    pub title: String,
    /// Taskbar icon, refreshed from the root folder on every sync.
    pub icon: String,
    pub breadcrumb: Vec<BreadcrumbEntry>,
    pub is_active: bool,
    pub is_minimized: bool,
}

impl FolderView {
    pub(crate) fn for_folder(folder: &DesktopItem) -> Self {
        Self {
            view_id: folder.id.clone(),
            title: folder.title.clone(),
            icon: folder.icon.clone(),
            breadcrumb: vec![BreadcrumbEntry {
                id: folder.id.clone(),
                title: folder.title.clone(),
            }],
            is_active: true,
            is_minimized: false,
        }
    }

    pub fn state(&self) -> ViewState {
        if self.is_minimized {
            ViewState::Minimized
        } else if self.is_active {
            ViewState::OpenActive
        } else {
            ViewState::OpenInactive
        }
    }

    /// Id of the folder currently displayed.
    pub fn current_folder_id(&self) -> &ItemId {
        self.breadcrumb
            .last()
            .map(|entry| &entry.id)
            .unwrap_or(&self.view_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    /// Avatar image URI. Empty when unset.
    pub avatar: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_USER_NAME.to_string(),
            avatar: String::new(),
        }
    }
}

/// The whole desktop as owned by the runtime.
///
/// Everything except `profile` is persisted as one blob; the profile lives under its own keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopState {
    pub forest: Vec<DesktopItem>,
    pub wallpaper: String,
    pub theme: Theme,
    pub views: Vec<FolderView>,
    pub start_menu_open: bool,
    pub profile: UserProfile,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            forest: Vec::new(),
            wallpaper: DEFAULT_WALLPAPER.to_string(),
            theme: Theme::Dark,
            views: Vec::new(),
            start_menu_open: false,
            profile: UserProfile::default(),
        }
    }
}

impl DesktopState {
    pub fn active_view_id(&self) -> Option<&ItemId> {
        self.views
            .iter()
            .find(|view| view.is_active)
            .map(|view| &view.view_id)
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            schema_version: DESKTOP_STATE_SCHEMA_VERSION,
            wallpaper: self.wallpaper.clone(),
            theme: self.theme,
            items: self.forest.clone(),
            open_windows: self.views.clone(),
            start_menu_open: self.start_menu_open,
        }
    }

    /// Rebuilds state from a persisted snapshot, dropping or truncating views the stored forest
    /// no longer backs.
    pub fn from_snapshot(snapshot: DesktopSnapshot, profile: UserProfile) -> Self {
        let views = crate::window_manager::sync_views(&snapshot.open_windows, &snapshot.items);
        Self {
            forest: snapshot.items,
            wallpaper: snapshot.wallpaper,
            theme: snapshot.theme,
            views,
            start_menu_open: snapshot.start_menu_open,
            profile,
        }
    }
}

/// Serialized form of [`DesktopState`] stored under the `desktopState` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopSnapshot {
    pub schema_version: u32,
    pub wallpaper: String,
    pub theme: Theme,
    pub items: Vec<DesktopItem>,
    pub open_windows: Vec<FolderView>,
    pub start_menu_open: bool,
}

/// Transient shell state that is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellUiState {
    /// URL accepted from the clipboard, waiting in the new-shortcut form.
    pub draft_shortcut_url: Option<String>,
    /// Title suggested for the drafted URL.
    pub draft_shortcut_title: Option<String>,
    /// User-visible, non-fatal message.
    pub notice: Option<String>,
    /// Set while the stored desktop has not been hydrated yet. Persist effects are suppressed.
    pub boot_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentCounts {
    pub folder_count: usize,
    pub shortcut_count: usize,
}

/// Where an imported image is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportTarget {
    Wallpaper,
    Avatar,
    ItemIcon(ItemId),
}

impl ImportTarget {
    pub fn kind(&self) -> ImportKind {
        match self {
            Self::Wallpaper => ImportKind::Wallpaper,
            Self::Avatar => ImportKind::Avatar,
            Self::ItemIcon(_) => ImportKind::ItemIcon,
        }
    }
}
