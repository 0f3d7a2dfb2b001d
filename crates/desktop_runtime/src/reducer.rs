//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use platform_host::ImportedFile;
use thiserror::Error;
use url::Url;

use crate::{
    model::{
        suggest_shortcut_title, DesktopItem, DesktopSnapshot, DesktopState, ImportTarget, ItemId,
        ItemKind, ItemPatch, ShellUiState, Theme, UserProfile, DEFAULT_FOLDER_TITLE,
    },
    tree::{self, TreeError},
    window_manager::{self, ViewError},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Create a shortcut on the desktop. An empty icon asks the host for the site favicon.
    AddShortcut {
        title: String,
        target_url: String,
        icon: String,
    },
    /// Create an empty folder on the desktop.
    AddFolder { title: String, icon: String },
    /// Append an item to a folder, moving it there if it already lives elsewhere.
    AddItemToFolder { folder_id: ItemId, item: DesktopItem },
    /// Create a shortcut inside a folder.
    AddShortcutToFolder {
        folder_id: ItemId,
        title: String,
        target_url: String,
        icon: String,
    },
    /// Create a folder inside a folder. An empty title falls back to the default folder name.
    AddFolderToFolder {
        folder_id: ItemId,
        title: String,
        icon: String,
    },
    /// Merge a partial edit over an item.
    UpdateItem { item_id: ItemId, patch: ItemPatch },
    /// Save an edited item, keeping its usage count and children.
    ReplaceItem { item: DesktopItem },
    /// Delete an item and its subtree.
    RemoveItem { item_id: ItemId },
    /// User opened an item: shortcuts launch their URL, folders open a view.
    OpenItem { item_id: ItemId },
    /// Favicon lookup finished for an item.
    ApplyResolvedIcon { item_id: ItemId, icon: String },
    /// Open (or activate) a view without counting it as a use.
    OpenView { folder_id: ItemId },
    ActivateView { view_id: ItemId },
    MinimizeView { view_id: ItemId },
    RestoreView { view_id: ItemId },
    CloseView { view_id: ItemId },
    /// Taskbar button click.
    ToggleTaskbarView { view_id: ItemId },
    /// Descend a view into a child folder of the one it shows.
    NavigateInto { view_id: ItemId, folder_id: ItemId },
    /// Jump a view back to a breadcrumb entry.
    NavigateTo { view_id: ItemId, index: usize },
    ToggleStartMenu,
    CloseStartMenu,
    SetWallpaper { wallpaper: String },
    SetTheme { theme: Theme },
    UpdateProfile { profile: UserProfile },
    /// Ask the host for clipboard text to prefill the new-shortcut form.
    PasteShortcutUrl,
    /// Clipboard text passed URL validation.
    ClipboardUrlAccepted { url: String },
    /// Discard the prefilled new-shortcut form.
    ClearShortcutDraft,
    /// Ask the host to pick an image file for `target`.
    RequestImport { target: ImportTarget },
    /// A picked image passed validation.
    ApplyImportedFile {
        target: ImportTarget,
        file: ImportedFile,
    },
    ShowNotice { message: String },
    DismissNotice,
    /// Wipe persisted data and reset to the first-boot state.
    ClearAllData,
    /// Replace state with a loaded snapshot.
    HydrateSnapshot {
        snapshot: DesktopSnapshot,
        profile: UserProfile,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host layer to execute.
pub enum RuntimeEffect {
    /// Write the desktop snapshot through to the prefs store.
    PersistDesktop,
    /// Write the user name and avatar through to the prefs store.
    PersistProfile,
    /// Delete every key the desktop has ever written.
    ClearPersistedData,
    /// Look up a favicon for `url` and report it back for `item_id`.
    ResolveFavicon { item_id: ItemId, url: String },
    /// Open a shortcut target outside the desktop.
    OpenExternalUrl(String),
    /// Read clipboard text for the new-shortcut form.
    ReadClipboard,
    /// Show a file picker for an image import.
    PickFile(ImportTarget),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// User input rejected before it reaches the tree.
pub enum InputError {
    /// Titles must contain something other than whitespace.
    #[error("a title is required")]
    EmptyTitle,
    /// Shortcut targets must parse as absolute URLs.
    #[error("`{0}` is not a valid URL")]
    InvalidUrl(String),
    /// The profile name must contain something other than whitespace.
    #[error("a user name is required")]
    EmptyUserName,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions. State is left unchanged when one is returned.
pub enum ReducerError {
    /// An item id did not resolve.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// A view id did not resolve or navigation was invalid.
    #[error(transparent)]
    View(#[from] ViewError),
    /// Rejected user input.
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// This is the only writer of [`DesktopState`]. Every change to persisted fields emits
/// [`RuntimeEffect::PersistDesktop`] or [`RuntimeEffect::PersistProfile`], except while
/// [`ShellUiState::boot_pending`] is set: until [`DesktopAction::HydrateSnapshot`] lands, persist
/// effects are dropped so the stored desktop is not overwritten by the blank boot state.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action references a missing item or view, or carries
/// invalid input. `state` and `ui` are untouched in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    ui: &mut ShellUiState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::AddShortcut {
            title,
            target_url,
            icon,
        } => {
            let item = new_shortcut(title, target_url, icon)?;
            let favicon = favicon_request(&item);
            let forest = tree::insert_top_level(&state.forest, item)?;
            commit_forest(state, forest);
            state.start_menu_open = false;
            clear_draft(ui);
            effects.push(RuntimeEffect::PersistDesktop);
            effects.extend(favicon);
        }
        DesktopAction::AddFolder { title, icon } => {
            let title = required_title(title)?;
            let forest =
                tree::insert_top_level(&state.forest, DesktopItem::folder(title, icon))?;
            commit_forest(state, forest);
            state.start_menu_open = false;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::AddItemToFolder { folder_id, item } => {
            let forest = tree::insert(&state.forest, &folder_id, item)?;
            commit_forest(state, forest);
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::AddShortcutToFolder {
            folder_id,
            title,
            target_url,
            icon,
        } => {
            let item = new_shortcut(title, target_url, icon)?;
            let favicon = favicon_request(&item);
            let forest = tree::insert(&state.forest, &folder_id, item)?;
            commit_forest(state, forest);
            clear_draft(ui);
            effects.push(RuntimeEffect::PersistDesktop);
            effects.extend(favicon);
        }
        DesktopAction::AddFolderToFolder {
            folder_id,
            title,
            icon,
        } => {
            let title = if title.trim().is_empty() {
                DEFAULT_FOLDER_TITLE.to_string()
            } else {
                title.trim().to_string()
            };
            let forest = tree::insert(&state.forest, &folder_id, DesktopItem::folder(title, icon))?;
            commit_forest(state, forest);
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::UpdateItem { item_id, mut patch } => {
            if let Some(title) = patch.title.take() {
                patch.title = Some(required_title(title)?);
            }
            if let Some(url) = patch.target_url.take() {
                patch.target_url = Some(valid_url(url)?);
            }
            let forest = tree::update(&state.forest, &item_id, &patch)?;
            commit_forest(state, forest);
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::ReplaceItem { mut item } => {
            item.title = required_title(item.title)?;
            if let ItemKind::Shortcut { target_url } = &mut item.kind {
                *target_url = valid_url(std::mem::take(target_url))?;
            }
            let item_id = item.id.clone();
            let forest = tree::replace_item(&state.forest, item)?;
            let favicon = tree::find_by_id(&forest, &item_id).and_then(favicon_request);
            commit_forest(state, forest);
            effects.push(RuntimeEffect::PersistDesktop);
            effects.extend(favicon);
        }
        DesktopAction::RemoveItem { item_id } => {
            if tree::find_by_id(&state.forest, &item_id).is_none() {
                return Ok(effects);
            }
            let forest = tree::remove(&state.forest, &item_id);
            commit_forest(state, forest);
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::OpenItem { item_id } => {
            let item = tree::find_by_id(&state.forest, &item_id)
                .ok_or_else(|| TreeError::NotFound(item_id.clone()))?;
            let target_url = item.target_url().map(str::to_string);
            let forest = tree::increment_usage(&state.forest, &item_id);
            commit_forest(state, forest);
            match target_url {
                Some(url) => effects.push(RuntimeEffect::OpenExternalUrl(url)),
                None => window_manager::open_view(&mut state.views, &state.forest, &item_id)?,
            }
            state.start_menu_open = false;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::ApplyResolvedIcon { item_id, icon } => {
            if tree::find_by_id(&state.forest, &item_id).is_none() {
                return Ok(effects);
            }
            let forest = tree::update(&state.forest, &item_id, &ItemPatch::icon(icon))?;
            commit_forest(state, forest);
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::OpenView { folder_id } => {
            window_manager::open_view(&mut state.views, &state.forest, &folder_id)?;
            state.start_menu_open = false;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::ActivateView { view_id } => {
            require_view(window_manager::activate_view(&mut state.views, &view_id), view_id)?;
            state.start_menu_open = false;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::MinimizeView { view_id } => {
            require_view(window_manager::minimize_view(&mut state.views, &view_id), view_id)?;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::RestoreView { view_id } => {
            require_view(window_manager::restore_view(&mut state.views, &view_id), view_id)?;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::CloseView { view_id } => {
            require_view(window_manager::close_view(&mut state.views, &view_id), view_id)?;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::ToggleTaskbarView { view_id } => {
            require_view(
                window_manager::toggle_taskbar_view(&mut state.views, &view_id),
                view_id,
            )?;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::NavigateInto { view_id, folder_id } => {
            let mut views = state.views.clone();
            window_manager::navigate_into(&mut views, &state.forest, &view_id, &folder_id)?;
            state.views = views;
            let forest = tree::increment_usage(&state.forest, &folder_id);
            commit_forest(state, forest);
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::NavigateTo { view_id, index } => {
            window_manager::navigate_to(&mut state.views, &view_id, index)?;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::CloseStartMenu => {
            if state.start_menu_open {
                state.start_menu_open = false;
                effects.push(RuntimeEffect::PersistDesktop);
            }
        }
        DesktopAction::SetWallpaper { wallpaper } => {
            state.wallpaper = wallpaper;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::SetTheme { theme } => {
            state.theme = theme;
            effects.push(RuntimeEffect::PersistDesktop);
        }
        DesktopAction::UpdateProfile { profile } => {
            let name = profile.name.trim();
            if name.is_empty() {
                return Err(InputError::EmptyUserName.into());
            }
            state.profile = UserProfile {
                name: name.to_string(),
                avatar: profile.avatar,
            };
            effects.push(RuntimeEffect::PersistProfile);
        }
        DesktopAction::PasteShortcutUrl => {
            effects.push(RuntimeEffect::ReadClipboard);
        }
        DesktopAction::ClipboardUrlAccepted { url } => {
            ui.draft_shortcut_title = suggest_shortcut_title(&url);
            ui.draft_shortcut_url = Some(url);
            ui.notice = None;
        }
        DesktopAction::ClearShortcutDraft => clear_draft(ui),
        DesktopAction::RequestImport { target } => {
            if let ImportTarget::ItemIcon(item_id) = &target {
                if tree::find_by_id(&state.forest, item_id).is_none() {
                    return Err(TreeError::NotFound(item_id.clone()).into());
                }
            }
            effects.push(RuntimeEffect::PickFile(target));
        }
        DesktopAction::ApplyImportedFile { target, file } => match target {
            ImportTarget::Wallpaper => {
                state.wallpaper = file.data_uri;
                effects.push(RuntimeEffect::PersistDesktop);
            }
            ImportTarget::Avatar => {
                state.profile.avatar = file.data_uri;
                effects.push(RuntimeEffect::PersistProfile);
            }
            ImportTarget::ItemIcon(item_id) => {
                if tree::find_by_id(&state.forest, &item_id).is_some() {
                    let forest =
                        tree::update(&state.forest, &item_id, &ItemPatch::icon(file.data_uri))?;
                    commit_forest(state, forest);
                    effects.push(RuntimeEffect::PersistDesktop);
                }
            }
        },
        DesktopAction::ShowNotice { message } => {
            ui.notice = Some(message);
        }
        DesktopAction::DismissNotice => {
            ui.notice = None;
        }
        DesktopAction::ClearAllData => {
            *state = DesktopState::default();
            *ui = ShellUiState {
                boot_pending: ui.boot_pending,
                ..ShellUiState::default()
            };
            effects.push(RuntimeEffect::ClearPersistedData);
        }
        DesktopAction::HydrateSnapshot { snapshot, profile } => {
            *state = DesktopState::from_snapshot(snapshot, profile);
            ui.boot_pending = false;
        }
    }

    if ui.boot_pending {
        effects.retain(|effect| {
            !matches!(
                effect,
                RuntimeEffect::PersistDesktop | RuntimeEffect::PersistProfile
            )
        });
    }
    Ok(effects)
}

/// Installs a mutated forest and re-derives every open view against it.
fn commit_forest(state: &mut DesktopState, forest: Vec<DesktopItem>) {
    state.views = window_manager::sync_views(&state.views, &forest);
    state.forest = forest;
}

fn require_view(found: bool, view_id: ItemId) -> Result<(), ViewError> {
    if found {
        Ok(())
    } else {
        Err(ViewError::ViewNotFound(view_id))
    }
}

fn clear_draft(ui: &mut ShellUiState) {
    ui.draft_shortcut_url = None;
    ui.draft_shortcut_title = None;
}

fn required_title(title: String) -> Result<String, InputError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err(InputError::EmptyTitle)
    } else {
        Ok(trimmed.to_string())
    }
}

fn valid_url(url: String) -> Result<String, InputError> {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(_) => Ok(trimmed.to_string()),
        Err(_) => Err(InputError::InvalidUrl(url)),
    }
}

fn new_shortcut(title: String, target_url: String, icon: String) -> Result<DesktopItem, InputError> {
    let title = required_title(title)?;
    let target_url = valid_url(target_url)?;
    Ok(DesktopItem::shortcut(title, target_url, icon.trim()))
}

/// Shortcuts without an icon get one looked up by the host.
fn favicon_request(item: &DesktopItem) -> Option<RuntimeEffect> {
    match item.target_url() {
        Some(url) if item.icon.is_empty() => Some(RuntimeEffect::ResolveFavicon {
            item_id: item.id.clone(),
            url: url.to_string(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::ViewState;

    fn reduce(
        state: &mut DesktopState,
        ui: &mut ShellUiState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, ui, action).expect("reduce")
    }

    fn add_folder(state: &mut DesktopState, ui: &mut ShellUiState, title: &str) -> ItemId {
        reduce(
            state,
            ui,
            DesktopAction::AddFolder {
                title: title.to_string(),
                icon: String::new(),
            },
        );
        state.forest.last().expect("folder").id.clone()
    }

    fn add_shortcut(state: &mut DesktopState, ui: &mut ShellUiState, url: &str) -> ItemId {
        reduce(
            state,
            ui,
            DesktopAction::AddShortcut {
                title: "Site".to_string(),
                target_url: url.to_string(),
                icon: "/site.png".to_string(),
            },
        );
        state.forest.last().expect("shortcut").id.clone()
    }

    #[test]
    fn adding_shortcut_without_icon_requests_favicon_and_persists() {
        let mut state = DesktopState {
            start_menu_open: true,
            ..DesktopState::default()
        };
        let mut ui = ShellUiState::default();

        let effects = reduce(
            &mut state,
            &mut ui,
            DesktopAction::AddShortcut {
                title: " Rust ".to_string(),
                target_url: "https://www.rust-lang.org".to_string(),
                icon: String::new(),
            },
        );

        let item = &state.forest[0];
        assert_eq!(item.title, "Rust");
        assert!(!state.start_menu_open);
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistDesktop,
                RuntimeEffect::ResolveFavicon {
                    item_id: item.id.clone(),
                    url: "https://www.rust-lang.org".to_string(),
                },
            ]
        );
    }

    #[test]
    fn invalid_input_leaves_state_untouched() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let before = state.clone();

        let err = reduce_desktop(
            &mut state,
            &mut ui,
            DesktopAction::AddShortcut {
                title: "Bad".to_string(),
                target_url: "not a url".to_string(),
                icon: String::new(),
            },
        )
        .expect_err("invalid url");
        assert_eq!(
            err,
            ReducerError::Input(InputError::InvalidUrl("not a url".to_string()))
        );

        let err = reduce_desktop(
            &mut state,
            &mut ui,
            DesktopAction::AddFolder {
                title: "   ".to_string(),
                icon: String::new(),
            },
        )
        .expect_err("empty title");
        assert_eq!(err, ReducerError::Input(InputError::EmptyTitle));
        assert_eq!(state, before);
    }

    #[test]
    fn opening_shortcut_counts_use_and_launches_url() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let id = add_shortcut(&mut state, &mut ui, "https://x.com");

        let effects = reduce(&mut state, &mut ui, DesktopAction::OpenItem { item_id: id });

        assert_eq!(state.forest[0].usage_count, 1);
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::OpenExternalUrl("https://x.com".to_string()),
                RuntimeEffect::PersistDesktop,
            ]
        );
        assert!(state.views.is_empty());
    }

    #[test]
    fn opening_folder_twice_reuses_its_view() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let folder = add_folder(&mut state, &mut ui, "Work");
        state.start_menu_open = true;

        reduce(&mut state, &mut ui, DesktopAction::OpenItem { item_id: folder.clone() });
        reduce(&mut state, &mut ui, DesktopAction::OpenItem { item_id: folder.clone() });

        assert_eq!(state.views.len(), 1);
        assert_eq!(state.active_view_id(), Some(&folder));
        assert_eq!(state.forest[0].usage_count, 2);
        assert!(!state.start_menu_open);
    }

    #[test]
    fn folder_shortcuts_and_subfolders_land_inside_open_view() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let folder = add_folder(&mut state, &mut ui, "Work");
        reduce(&mut state, &mut ui, DesktopAction::OpenView { folder_id: folder.clone() });

        reduce(
            &mut state,
            &mut ui,
            DesktopAction::AddFolderToFolder {
                folder_id: folder.clone(),
                title: String::new(),
                icon: String::new(),
            },
        );
        let effects = reduce(
            &mut state,
            &mut ui,
            DesktopAction::AddShortcutToFolder {
                folder_id: folder.clone(),
                title: "Docs".to_string(),
                target_url: "https://docs.rs".to_string(),
                icon: String::new(),
            },
        );

        let children = state.forest[0].children().expect("children");
        assert_eq!(children[0].title, DEFAULT_FOLDER_TITLE);
        assert_eq!(children[1].title, "Docs");
        assert!(matches!(effects[1], RuntimeEffect::ResolveFavicon { .. }));

        let missing = ItemId::from("missing");
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut ui,
                DesktopAction::AddFolderToFolder {
                    folder_id: missing.clone(),
                    title: String::new(),
                    icon: String::new(),
                },
            ),
            Err(ReducerError::Tree(TreeError::NotFound(missing)))
        );
    }

    #[test]
    fn removing_folder_closes_views_rooted_inside_it() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let outer = add_folder(&mut state, &mut ui, "Outer");
        reduce(
            &mut state,
            &mut ui,
            DesktopAction::AddFolderToFolder {
                folder_id: outer.clone(),
                title: "Inner".to_string(),
                icon: String::new(),
            },
        );
        let inner = state.forest[0].children().expect("children")[0].id.clone();
        reduce(&mut state, &mut ui, DesktopAction::OpenView { folder_id: inner });
        reduce(&mut state, &mut ui, DesktopAction::OpenView { folder_id: outer.clone() });
        assert_eq!(state.views.len(), 2);

        let effects = reduce(&mut state, &mut ui, DesktopAction::RemoveItem { item_id: outer });

        assert!(state.forest.is_empty());
        assert!(state.views.is_empty());
        assert_eq!(effects, vec![RuntimeEffect::PersistDesktop]);

        let effects = reduce(
            &mut state,
            &mut ui,
            DesktopAction::RemoveItem {
                item_id: ItemId::from("absent"),
            },
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn navigating_into_subfolder_counts_use_and_renames_refresh_breadcrumb() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let root = add_folder(&mut state, &mut ui, "Root");
        reduce(
            &mut state,
            &mut ui,
            DesktopAction::AddFolderToFolder {
                folder_id: root.clone(),
                title: "Child".to_string(),
                icon: String::new(),
            },
        );
        let child = state.forest[0].children().expect("children")[0].id.clone();
        reduce(&mut state, &mut ui, DesktopAction::OpenView { folder_id: root.clone() });
        reduce(
            &mut state,
            &mut ui,
            DesktopAction::NavigateInto {
                view_id: root.clone(),
                folder_id: child.clone(),
            },
        );

        reduce(
            &mut state,
            &mut ui,
            DesktopAction::UpdateItem {
                item_id: child.clone(),
                patch: ItemPatch {
                    title: Some("Renamed".to_string()),
                    ..ItemPatch::default()
                },
            },
        );

        let view = &state.views[0];
        assert_eq!(view.breadcrumb.len(), 2);
        assert_eq!(view.breadcrumb[1].title, "Renamed");
        assert_eq!(
            tree::find_by_id(&state.forest, &child).map(|f| f.usage_count),
            Some(1)
        );

        reduce(
            &mut state,
            &mut ui,
            DesktopAction::NavigateTo {
                view_id: root.clone(),
                index: 0,
            },
        );
        assert_eq!(state.views[0].breadcrumb.len(), 1);
    }

    #[test]
    fn taskbar_toggle_minimizes_if_visible_and_restores_if_minimized() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let folder = add_folder(&mut state, &mut ui, "Work");
        reduce(&mut state, &mut ui, DesktopAction::OpenView { folder_id: folder.clone() });

        reduce(
            &mut state,
            &mut ui,
            DesktopAction::ToggleTaskbarView {
                view_id: folder.clone(),
            },
        );
        assert_eq!(state.views[0].state(), ViewState::Minimized);
        assert_eq!(state.active_view_id(), None);

        reduce(
            &mut state,
            &mut ui,
            DesktopAction::ToggleTaskbarView {
                view_id: folder.clone(),
            },
        );
        assert_eq!(state.views[0].state(), ViewState::OpenActive);

        let missing = ItemId::from("missing");
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut ui,
                DesktopAction::CloseView {
                    view_id: missing.clone(),
                },
            ),
            Err(ReducerError::View(ViewError::ViewNotFound(missing)))
        );
    }

    #[test]
    fn late_favicon_is_applied_or_dropped() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let id = add_shortcut(&mut state, &mut ui, "https://x.com");

        let effects = reduce(
            &mut state,
            &mut ui,
            DesktopAction::ApplyResolvedIcon {
                item_id: id.clone(),
                icon: "https://icons.example/x.png".to_string(),
            },
        );
        assert_eq!(state.forest[0].icon, "https://icons.example/x.png");
        assert_eq!(effects, vec![RuntimeEffect::PersistDesktop]);

        reduce(&mut state, &mut ui, DesktopAction::RemoveItem { item_id: id.clone() });
        let effects = reduce(
            &mut state,
            &mut ui,
            DesktopAction::ApplyResolvedIcon {
                item_id: id,
                icon: "late".to_string(),
            },
        );
        assert!(effects.is_empty());
        assert!(state.forest.is_empty());
    }

    #[test]
    fn replace_item_keeps_usage_and_rerequests_missing_icon() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let id = add_shortcut(&mut state, &mut ui, "https://x.com");
        reduce(&mut state, &mut ui, DesktopAction::OpenItem { item_id: id.clone() });

        let mut edited = state.forest[0].clone();
        edited.title = "X".to_string();
        edited.icon = String::new();
        edited.usage_count = 0;
        edited.kind = ItemKind::Shortcut {
            target_url: "https://y.com".to_string(),
        };
        let effects = reduce(&mut state, &mut ui, DesktopAction::ReplaceItem { item: edited });

        assert_eq!(state.forest[0].usage_count, 1);
        assert_eq!(state.forest[0].target_url(), Some("https://y.com"));
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistDesktop,
                RuntimeEffect::ResolveFavicon {
                    item_id: id,
                    url: "https://y.com".to_string(),
                },
            ]
        );
    }

    #[test]
    fn clipboard_flow_prefills_draft_and_adding_clears_it() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState {
            notice: Some("old".to_string()),
            ..ShellUiState::default()
        };

        assert_eq!(
            reduce(&mut state, &mut ui, DesktopAction::PasteShortcutUrl),
            vec![RuntimeEffect::ReadClipboard]
        );
        reduce(
            &mut state,
            &mut ui,
            DesktopAction::ClipboardUrlAccepted {
                url: "https://www.github.com/".to_string(),
            },
        );
        assert_eq!(ui.draft_shortcut_url.as_deref(), Some("https://www.github.com/"));
        assert_eq!(ui.draft_shortcut_title.as_deref(), Some("Github.com"));
        assert_eq!(ui.notice, None);

        add_shortcut(&mut state, &mut ui, "https://www.github.com/");
        assert_eq!(ui.draft_shortcut_url, None);
    }

    #[test]
    fn imports_apply_to_their_targets() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let id = add_shortcut(&mut state, &mut ui, "https://x.com");
        let file = ImportedFile {
            name: "pic.png".to_string(),
            mime_type: "image/png".to_string(),
            size_bytes: 10,
            data_uri: "data:image/png;base64,AAAA".to_string(),
        };

        assert_eq!(
            reduce(
                &mut state,
                &mut ui,
                DesktopAction::RequestImport {
                    target: ImportTarget::ItemIcon(id.clone()),
                },
            ),
            vec![RuntimeEffect::PickFile(ImportTarget::ItemIcon(id.clone()))]
        );
        assert!(reduce_desktop(
            &mut state,
            &mut ui,
            DesktopAction::RequestImport {
                target: ImportTarget::ItemIcon(ItemId::from("missing")),
            },
        )
        .is_err());

        reduce(
            &mut state,
            &mut ui,
            DesktopAction::ApplyImportedFile {
                target: ImportTarget::ItemIcon(id),
                file: file.clone(),
            },
        );
        assert_eq!(state.forest[0].icon, file.data_uri);

        let effects = reduce(
            &mut state,
            &mut ui,
            DesktopAction::ApplyImportedFile {
                target: ImportTarget::Avatar,
                file: file.clone(),
            },
        );
        assert_eq!(state.profile.avatar, file.data_uri);
        assert_eq!(effects, vec![RuntimeEffect::PersistProfile]);

        reduce(
            &mut state,
            &mut ui,
            DesktopAction::ApplyImportedFile {
                target: ImportTarget::Wallpaper,
                file: file.clone(),
            },
        );
        assert_eq!(state.wallpaper, file.data_uri);
    }

    #[test]
    fn profile_update_requires_a_name() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();

        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut ui,
                DesktopAction::UpdateProfile {
                    profile: UserProfile {
                        name: " ".to_string(),
                        avatar: String::new(),
                    },
                },
            ),
            Err(ReducerError::Input(InputError::EmptyUserName))
        );

        let effects = reduce(
            &mut state,
            &mut ui,
            DesktopAction::UpdateProfile {
                profile: UserProfile {
                    name: "Ada ".to_string(),
                    avatar: "data:image/png;base64,AA".to_string(),
                },
            },
        );
        assert_eq!(state.profile.name, "Ada");
        assert_eq!(effects, vec![RuntimeEffect::PersistProfile]);
    }

    #[test]
    fn clear_all_data_resets_everything_without_rewriting_state() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let folder = add_folder(&mut state, &mut ui, "Work");
        reduce(&mut state, &mut ui, DesktopAction::OpenView { folder_id: folder });
        reduce(&mut state, &mut ui, DesktopAction::SetTheme { theme: Theme::Light });
        reduce(
            &mut state,
            &mut ui,
            DesktopAction::ShowNotice {
                message: "hi".to_string(),
            },
        );

        let effects = reduce(&mut state, &mut ui, DesktopAction::ClearAllData);

        assert_eq!(state, DesktopState::default());
        assert_eq!(ui, ShellUiState::default());
        assert_eq!(effects, vec![RuntimeEffect::ClearPersistedData]);
    }

    #[test]
    fn hydrate_drops_views_the_snapshot_forest_cannot_back() {
        let folder = DesktopItem::folder("Kept", "");
        let ghost = DesktopItem::folder("Ghost", "");
        let mut source = DesktopState {
            forest: vec![folder.clone(), ghost.clone()],
            ..DesktopState::default()
        };
        window_manager::open_view(&mut source.views, &source.forest, &ghost.id).expect("ghost");
        window_manager::open_view(&mut source.views, &source.forest, &folder.id).expect("kept");
        let mut snapshot = source.snapshot();
        snapshot.items.retain(|item| item.id != ghost.id);

        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let effects = reduce(
            &mut state,
            &mut ui,
            DesktopAction::HydrateSnapshot {
                snapshot,
                profile: UserProfile::default(),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(state.views.len(), 1);
        assert_eq!(state.active_view_id(), Some(&folder.id));
    }

    #[test]
    fn start_menu_toggle_persists() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        assert_eq!(
            reduce(&mut state, &mut ui, DesktopAction::ToggleStartMenu),
            vec![RuntimeEffect::PersistDesktop]
        );
        assert!(state.start_menu_open);
        reduce(&mut state, &mut ui, DesktopAction::CloseStartMenu);
        assert!(!state.start_menu_open);
        assert!(reduce(&mut state, &mut ui, DesktopAction::CloseStartMenu).is_empty());
    }

    #[test]
    fn moving_top_level_shortcut_into_folder_persists() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let folder = add_folder(&mut state, &mut ui, "Work");
        let site = add_shortcut(&mut state, &mut ui, "https://a.example");
        let item = tree::find_by_id(&state.forest, &site).expect("site").clone();

        let effects = reduce(
            &mut state,
            &mut ui,
            DesktopAction::AddItemToFolder {
                folder_id: folder.clone(),
                item,
            },
        );

        assert_eq!(effects, vec![RuntimeEffect::PersistDesktop]);
        assert_eq!(state.forest.len(), 1);
        assert_eq!(tree::parent_of(&state.forest, &site), Some(&folder));
    }

    #[test]
    fn moving_folder_out_of_breadcrumb_truncates_view() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let root = add_folder(&mut state, &mut ui, "Root");
        let elsewhere = add_folder(&mut state, &mut ui, "Elsewhere");
        reduce(
            &mut state,
            &mut ui,
            DesktopAction::AddFolderToFolder {
                folder_id: root.clone(),
                title: "Child".to_string(),
                icon: String::new(),
            },
        );
        let child = state.forest[0].children().expect("children")[0].clone();
        reduce(&mut state, &mut ui, DesktopAction::OpenView { folder_id: root.clone() });
        reduce(
            &mut state,
            &mut ui,
            DesktopAction::NavigateInto {
                view_id: root.clone(),
                folder_id: child.id.clone(),
            },
        );
        assert_eq!(state.views[0].breadcrumb.len(), 2);

        reduce(
            &mut state,
            &mut ui,
            DesktopAction::AddItemToFolder {
                folder_id: elsewhere.clone(),
                item: child.clone(),
            },
        );

        assert_eq!(state.views.len(), 1);
        assert_eq!(state.views[0].breadcrumb.len(), 1);
        assert_eq!(state.views[0].breadcrumb[0].id, root);
        assert_eq!(tree::parent_of(&state.forest, &child.id), Some(&elsewhere));
    }

    #[test]
    fn moving_folder_into_its_descendant_is_rejected_unchanged() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState::default();
        let outer = add_folder(&mut state, &mut ui, "Outer");
        reduce(
            &mut state,
            &mut ui,
            DesktopAction::AddFolderToFolder {
                folder_id: outer.clone(),
                title: "Inner".to_string(),
                icon: String::new(),
            },
        );
        let inner = state.forest[0].children().expect("children")[0].id.clone();
        let item = state.forest[0].clone();
        let before = state.clone();

        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut ui,
                DesktopAction::AddItemToFolder {
                    folder_id: inner,
                    item,
                },
            ),
            Err(ReducerError::Tree(TreeError::WouldCycle(outer)))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn persist_effects_wait_for_hydration() {
        let mut state = DesktopState::default();
        let mut ui = ShellUiState {
            boot_pending: true,
            ..ShellUiState::default()
        };

        let effects = reduce(&mut state, &mut ui, DesktopAction::ToggleStartMenu);
        assert!(effects.is_empty());
        assert!(state.start_menu_open);

        let effects = reduce(&mut state, &mut ui, DesktopAction::ClearAllData);
        assert_eq!(effects, vec![RuntimeEffect::ClearPersistedData]);
        assert!(ui.boot_pending);

        let stored = DesktopState {
            forest: vec![DesktopItem::folder("Stored", "")],
            ..DesktopState::default()
        };
        reduce(
            &mut state,
            &mut ui,
            DesktopAction::HydrateSnapshot {
                snapshot: stored.snapshot(),
                profile: UserProfile::default(),
            },
        );
        assert!(!ui.boot_pending);
        assert_eq!(state.forest, stored.forest);
        assert_eq!(
            reduce(&mut state, &mut ui, DesktopAction::ToggleStartMenu),
            vec![RuntimeEffect::PersistDesktop]
        );
    }
}
