//! Desktop runtime persistence adapters for boot hydration and write-through saves.
//!
//! The desktop blob lives under [`DESKTOP_STATE_KEY`]; the profile is split across
//! [`USER_NAME_KEY`] and [`USER_AVATAR_KEY`] so it survives independently of the layout.

use platform_host::{load_pref_with, save_pref_with, PrefsStore};
use serde::{Deserialize, Serialize};

use crate::{
    config::DesktopConfig,
    model::{
        DesktopSnapshot, DesktopState, Theme, UserProfile, DEFAULT_USER_NAME,
        DESKTOP_STATE_SCHEMA_VERSION,
    },
    tree,
};

pub const DESKTOP_STATE_KEY: &str = "desktopState";
pub const USER_NAME_KEY: &str = "userName";
pub const USER_AVATAR_KEY: &str = "userAvatar";

/// Every key the desktop has written, legacy layout keys included. Clearing removes them all.
pub const CLEARED_KEYS: [&str; 7] = [
    "shortcuts",
    "folders",
    "wallpaper",
    "theme",
    DESKTOP_STATE_KEY,
    USER_NAME_KEY,
    USER_AVATAR_KEY,
];

/// Loads the persisted desktop snapshot if a current-schema one is present.
///
/// Store failures, malformed JSON and unknown schema versions are logged and yield `None`.
pub async fn load_desktop_snapshot<S: PrefsStore + ?Sized>(store: &S) -> Option<DesktopSnapshot> {
    match load_pref_with::<_, DesktopSnapshot>(store, DESKTOP_STATE_KEY).await {
        Ok(Some(snapshot)) if snapshot.schema_version == DESKTOP_STATE_SCHEMA_VERSION => {
            Some(snapshot)
        }
        Ok(Some(snapshot)) => {
            leptos::logging::warn!(
                "ignoring desktop snapshot with unsupported schema version {}",
                snapshot.schema_version
            );
            None
        }
        Ok(None) => None,
        Err(err) => {
            leptos::logging::warn!("desktop snapshot load failed: {err}");
            None
        }
    }
}

/// Loads the user profile, falling back field by field to the defaults.
pub async fn load_user_profile<S: PrefsStore + ?Sized>(store: &S) -> UserProfile {
    let name = match load_pref_with::<_, String>(store, USER_NAME_KEY).await {
        Ok(Some(name)) if !name.trim().is_empty() => name,
        Ok(_) => DEFAULT_USER_NAME.to_string(),
        Err(err) => {
            leptos::logging::warn!("user name load failed: {err}");
            DEFAULT_USER_NAME.to_string()
        }
    };
    let avatar = match load_pref_with::<_, String>(store, USER_AVATAR_KEY).await {
        Ok(avatar) => avatar.unwrap_or_default(),
        Err(err) => {
            leptos::logging::warn!("user avatar load failed: {err}");
            String::new()
        }
    };
    UserProfile { name, avatar }
}

/// Loads the full desktop state. Never fails: anything unreadable becomes the default state.
pub async fn load_desktop_state<S: PrefsStore + ?Sized>(store: &S) -> DesktopState {
    let profile = load_user_profile(store).await;
    match load_desktop_snapshot(store).await {
        Some(snapshot) => DesktopState::from_snapshot(snapshot, profile),
        None => DesktopState {
            profile,
            ..DesktopState::default()
        },
    }
}

/// Writes the desktop snapshot under [`DESKTOP_STATE_KEY`], replacing any prior value.
pub async fn persist_desktop_state<S: PrefsStore + ?Sized>(
    store: &S,
    state: &DesktopState,
) -> Result<(), String> {
    save_pref_with(store, DESKTOP_STATE_KEY, &state.snapshot()).await
}

pub async fn persist_user_profile<S: PrefsStore + ?Sized>(
    store: &S,
    profile: &UserProfile,
) -> Result<(), String> {
    save_pref_with(store, USER_NAME_KEY, &profile.name).await?;
    save_pref_with(store, USER_AVATAR_KEY, &profile.avatar).await
}

/// Deletes every key in [`CLEARED_KEYS`]. Keeps going past failures and reports them together.
pub async fn clear_persisted_data<S: PrefsStore + ?Sized>(store: &S) -> Result<(), String> {
    let mut failures = Vec::new();
    for key in CLEARED_KEYS {
        if let Err(err) = store.delete_pref(key).await {
            failures.push(format!("{key}: {err}"));
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("; "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// What a full reset would erase, shown before the user confirms it.
pub struct DataSummary {
    pub top_level_shortcuts: usize,
    pub top_level_folders: usize,
    /// Shortcuts at any depth inside folders.
    pub nested_shortcuts: usize,
    pub custom_wallpaper: bool,
    pub theme: Theme,
    pub user_name: String,
    pub has_avatar: bool,
}

pub fn summarize_data(state: &DesktopState, config: &DesktopConfig) -> DataSummary {
    let top_level_folders = state.forest.iter().filter(|item| item.is_folder()).count();
    let nested_shortcuts = state
        .forest
        .iter()
        .map(|item| tree::count_contents(item).shortcut_count)
        .sum();
    DataSummary {
        top_level_shortcuts: state.forest.len() - top_level_folders,
        top_level_folders,
        nested_shortcuts,
        custom_wallpaper: state.wallpaper != config.default_wallpaper,
        theme: state.theme,
        user_name: state.profile.name.clone(),
        has_avatar: !state.profile.avatar.is_empty(),
    }
}
