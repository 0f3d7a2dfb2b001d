//! Folder-view transition helpers used by the desktop reducer.
//!
//! A view is an open window onto a folder. Views are kept in open order (taskbar order) and are
//! re-derived from the forest after every tree mutation by [`sync_views`].

use thiserror::Error;

use crate::{
    model::{BreadcrumbEntry, DesktopItem, FolderView, ItemId},
    tree::{find_by_id, find_folder_by_id, TreeError},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures of view transitions and breadcrumb navigation.
pub enum ViewError {
    /// No open view exists for this folder id.
    #[error("no open view for folder `{0}`")]
    ViewNotFound(ItemId),
    /// The folder is not a direct child folder of the one the view currently shows.
    #[error("folder `{child}` is not inside the folder shown by view `{view}`")]
    NotInCurrentFolder {
        /// View being navigated.
        view: ItemId,
        /// Requested child folder.
        child: ItemId,
    },
    /// The target folder could not be resolved.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Opens a view on `folder_id`, or activates the existing one.
///
/// # Errors
///
/// [`ViewError::Tree`] when `folder_id` does not resolve to a folder.
pub fn open_view(
    views: &mut Vec<FolderView>,
    forest: &[DesktopItem],
    folder_id: &ItemId,
) -> Result<(), ViewError> {
    let folder =
        find_by_id(forest, folder_id).ok_or_else(|| TreeError::NotFound(folder_id.clone()))?;
    if !folder.is_folder() {
        return Err(TreeError::NotAFolder(folder_id.clone()).into());
    }
    if !views.iter().any(|view| &view.view_id == folder_id) {
        views.push(FolderView::for_folder(folder));
    }
    activate_view(views, folder_id);
    Ok(())
}

/// Makes `view_id` the single active, visible view.
///
/// Returns `false` when no such view exists.
pub fn activate_view(views: &mut [FolderView], view_id: &ItemId) -> bool {
    if !views.iter().any(|view| &view.view_id == view_id) {
        return false;
    }
    for view in views.iter_mut() {
        view.is_active = &view.view_id == view_id;
        if view.is_active {
            view.is_minimized = false;
        }
    }
    true
}

pub fn restore_view(views: &mut [FolderView], view_id: &ItemId) -> bool {
    activate_view(views, view_id)
}

/// Minimizes `view_id`. No other view is activated in its place.
pub fn minimize_view(views: &mut [FolderView], view_id: &ItemId) -> bool {
    let Some(view) = views.iter_mut().find(|view| &view.view_id == view_id) else {
        return false;
    };
    view.is_minimized = true;
    view.is_active = false;
    true
}

pub fn close_view(views: &mut Vec<FolderView>, view_id: &ItemId) -> bool {
    let before = views.len();
    views.retain(|view| &view.view_id != view_id);
    views.len() != before
}

/// Taskbar click: restores a minimized view, minimizes anything else.
pub fn toggle_taskbar_view(views: &mut [FolderView], view_id: &ItemId) -> bool {
    let Some(minimized) = views
        .iter()
        .find(|view| &view.view_id == view_id)
        .map(|view| view.is_minimized)
    else {
        return false;
    };
    if minimized {
        restore_view(views, view_id)
    } else {
        minimize_view(views, view_id)
    }
}

/// Descends `view_id` into `child_id`, a direct child folder of the folder it currently shows.
///
/// # Errors
///
/// [`ViewError::ViewNotFound`] for an unknown view, [`ViewError::NotInCurrentFolder`] when the
/// child is not a folder directly inside the displayed one.
pub fn navigate_into(
    views: &mut [FolderView],
    forest: &[DesktopItem],
    view_id: &ItemId,
    child_id: &ItemId,
) -> Result<(), ViewError> {
    let view = views
        .iter_mut()
        .find(|view| &view.view_id == view_id)
        .ok_or_else(|| ViewError::ViewNotFound(view_id.clone()))?;
    let child = resolve_view_folder(forest, view)
        .and_then(DesktopItem::children)
        .and_then(|children| {
            children
                .iter()
                .find(|child| &child.id == child_id && child.is_folder())
        })
        .ok_or_else(|| ViewError::NotInCurrentFolder {
            view: view_id.clone(),
            child: child_id.clone(),
        })?;
    view.breadcrumb.push(BreadcrumbEntry {
        id: child.id.clone(),
        title: child.title.clone(),
    });
    Ok(())
}

/// Jumps back to breadcrumb entry `index` (0 is the view's root). Out-of-range indexes are
/// ignored.
///
/// # Errors
///
/// [`ViewError::ViewNotFound`] for an unknown view.
pub fn navigate_to(
    views: &mut [FolderView],
    view_id: &ItemId,
    index: usize,
) -> Result<(), ViewError> {
    let view = views
        .iter_mut()
        .find(|view| &view.view_id == view_id)
        .ok_or_else(|| ViewError::ViewNotFound(view_id.clone()))?;
    if index < view.breadcrumb.len() {
        view.breadcrumb.truncate(index + 1);
    }
    Ok(())
}

/// Folder currently displayed by `view`: the deepest breadcrumb entry reachable from the root
/// through direct child folders. `None` when the root folder itself is gone.
pub fn resolve_view_folder<'a>(
    forest: &'a [DesktopItem],
    view: &FolderView,
) -> Option<&'a DesktopItem> {
    resolve_breadcrumb(forest, view).last().copied()
}

fn resolve_breadcrumb<'a>(forest: &'a [DesktopItem], view: &FolderView) -> Vec<&'a DesktopItem> {
    let Some(root) = find_folder_by_id(forest, &view.view_id) else {
        return Vec::new();
    };
    let mut path = vec![root];
    let mut current = root;
    for entry in view.breadcrumb.iter().skip(1) {
        let next = current.children().and_then(|children| {
            children
                .iter()
                .find(|child| child.id == entry.id && child.is_folder())
        });
        match next {
            Some(next) => {
                path.push(next);
                current = next;
            }
            None => break,
        }
    }
    path
}

/// Re-derives every view from `forest`.
///
/// A view whose root folder is gone is dropped. Otherwise its breadcrumb is cut back to the
/// deepest surviving folder, and breadcrumb titles plus the title/icon caches are refreshed.
pub fn sync_views(views: &[FolderView], forest: &[DesktopItem]) -> Vec<FolderView> {
    let mut synced: Vec<FolderView> = views
        .iter()
        .filter_map(|view| {
            let path = resolve_breadcrumb(forest, view);
            let root = path.first()?;
            Some(FolderView {
                view_id: view.view_id.clone(),
                title: root.title.clone(),
                icon: root.icon.clone(),
                breadcrumb: path
                    .iter()
                    .map(|folder| BreadcrumbEntry {
                        id: folder.id.clone(),
                        title: folder.title.clone(),
                    })
                    .collect(),
                is_active: view.is_active,
                is_minimized: view.is_minimized,
            })
        })
        .collect();
    normalize_views(&mut synced);
    synced
}

/// Enforces focus invariants: a minimized view is never active and at most one view is.
pub fn normalize_views(views: &mut [FolderView]) {
    let mut has_active = false;
    for view in views.iter_mut() {
        if view.is_minimized {
            view.is_active = false;
        }
        if view.is_active {
            if has_active {
                view.is_active = false;
            } else {
                has_active = true;
            }
        }
    }
}
