//! Copy-on-write operations over the desktop item forest.
//!
//! Every mutating function takes the current forest by reference and returns a rebuilt one. Only
//! the folders on the path to the touched node are rebuilt with new child lists; everything else
//! is cloned unchanged.

use thiserror::Error;

use crate::model::{ContentCounts, DesktopItem, ItemId, ItemKind, ItemPatch};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures of tree operations that require an existing target.
pub enum TreeError {
    /// No node with this id exists in the forest.
    #[error("item `{0}` not found")]
    NotFound(ItemId),
    /// The id resolves to a shortcut where a folder is required.
    #[error("item `{0}` is not a folder")]
    NotAFolder(ItemId),
    /// Moving a folder under itself or one of its descendants.
    #[error("folder `{0}` cannot be moved inside itself")]
    WouldCycle(ItemId),
    /// A new node carries a nested id that is already in the forest.
    #[error("item `{0}` already exists")]
    DuplicateId(ItemId),
}

/// Depth-first search, folder before its children, children in order.
pub fn find_by_id<'a>(forest: &'a [DesktopItem], id: &ItemId) -> Option<&'a DesktopItem> {
    for item in forest {
        if &item.id == id {
            return Some(item);
        }
        if let Some(found) = item.children().and_then(|children| find_by_id(children, id)) {
            return Some(found);
        }
    }
    None
}

pub fn find_folder_by_id<'a>(forest: &'a [DesktopItem], id: &ItemId) -> Option<&'a DesktopItem> {
    find_by_id(forest, id).filter(|item| item.is_folder())
}

/// Finds `id` strictly inside the subtree of folder `parent_id`.
pub fn find_by_id_under<'a>(
    forest: &'a [DesktopItem],
    parent_id: &ItemId,
    id: &ItemId,
) -> Option<&'a DesktopItem> {
    let children = find_folder_by_id(forest, parent_id)?.children()?;
    find_by_id(children, id)
}

/// Id of the folder directly containing `id`. `None` for top-level or absent ids.
pub fn parent_of<'a>(forest: &'a [DesktopItem], id: &ItemId) -> Option<&'a ItemId> {
    for item in forest {
        let Some(children) = item.children() else {
            continue;
        };
        if children.iter().any(|child| &child.id == id) {
            return Some(&item.id);
        }
        if let Some(parent) = parent_of(children, id) {
            return Some(parent);
        }
    }
    None
}

/// Appends `node` to the forest itself.
///
/// A node whose id is already in the forest is moved: the stored node, with its children and
/// usage count, is detached and re-appended. The caller's copy only supplies the id.
///
/// # Errors
///
/// [`TreeError::DuplicateId`] when a new node carries a nested id that already exists.
pub fn insert_top_level(
    forest: &[DesktopItem],
    node: DesktopItem,
) -> Result<Vec<DesktopItem>, TreeError> {
    let node = placed_node(forest, node)?;
    let mut next = remove(forest, &node.id);
    next.push(node);
    Ok(next)
}

/// Appends `node` to the children of folder `parent_id`.
///
/// A node whose id is already in the forest is moved: the stored node, with its children and
/// usage count, is detached from its old position and appended. The caller's copy only supplies
/// the id.
///
/// # Errors
///
/// [`TreeError::NotFound`] / [`TreeError::NotAFolder`] when `parent_id` does not resolve to a
/// folder, [`TreeError::WouldCycle`] when `parent_id` is the moved node or lies inside it,
/// [`TreeError::DuplicateId`] when a new node carries a nested id that already exists.
pub fn insert(
    forest: &[DesktopItem],
    parent_id: &ItemId,
    node: DesktopItem,
) -> Result<Vec<DesktopItem>, TreeError> {
    require_folder(forest, parent_id)?;
    let node = placed_node(forest, node)?;
    if &node.id == parent_id || find_by_id(std::slice::from_ref(&node), parent_id).is_some() {
        return Err(TreeError::WouldCycle(node.id));
    }

    let detached = remove(forest, &node.id);
    let mut node = Some(node);
    let (next, found) = rebuild_matching(&detached, parent_id, &mut |folder| {
        if let (ItemKind::Folder { children }, Some(node)) = (&mut folder.kind, node.take()) {
            children.push(node);
        }
    });
    if found {
        Ok(next)
    } else {
        Err(TreeError::NotFound(parent_id.clone()))
    }
}

/// The node that actually gets placed: the stored one when `node.id` is already in the forest,
/// otherwise `node` itself once none of its ids collide with the forest.
fn placed_node(forest: &[DesktopItem], node: DesktopItem) -> Result<DesktopItem, TreeError> {
    if let Some(stored) = find_by_id(forest, &node.id) {
        return Ok(stored.clone());
    }
    let collision = flatten(std::slice::from_ref(&node))
        .into_iter()
        .find(|item| find_by_id(forest, &item.id).is_some())
        .map(|item| item.id.clone());
    match collision {
        Some(id) => Err(TreeError::DuplicateId(id)),
        None => Ok(node),
    }
}

/// Merges `patch` over the node with `id`.
///
/// # Errors
///
/// [`TreeError::NotFound`] when `id` is absent.
pub fn update(
    forest: &[DesktopItem],
    id: &ItemId,
    patch: &ItemPatch,
) -> Result<Vec<DesktopItem>, TreeError> {
    let (next, found) = rebuild_matching(forest, id, &mut |item| patch.apply_to(item));
    if found {
        Ok(next)
    } else {
        Err(TreeError::NotFound(id.clone()))
    }
}

/// Replaces the stored node carrying `item.id` with `item`, keeping the stored usage count and,
/// for folders, the stored children. The stored node's kind never changes.
///
/// # Errors
///
/// [`TreeError::NotFound`] when no node carries `item.id`.
pub fn replace_item(
    forest: &[DesktopItem],
    item: DesktopItem,
) -> Result<Vec<DesktopItem>, TreeError> {
    let id = item.id.clone();
    let mut replacement = Some(item);
    let (next, found) = rebuild_matching(forest, &id, &mut |stored| {
        let Some(item) = replacement.take() else {
            return;
        };
        stored.title = item.title;
        stored.icon = item.icon;
        if let (ItemKind::Shortcut { target_url }, ItemKind::Shortcut { target_url: url }) =
            (&mut stored.kind, item.kind)
        {
            *target_url = url;
        }
    });
    if found {
        Ok(next)
    } else {
        Err(TreeError::NotFound(id))
    }
}

/// Deletes the node with `id` and its whole subtree. Absent ids leave the forest unchanged.
pub fn remove(forest: &[DesktopItem], id: &ItemId) -> Vec<DesktopItem> {
    forest
        .iter()
        .filter(|item| &item.id != id)
        .map(|item| match item.children() {
            Some(children) => item.with_children(remove(children, id)),
            None => item.clone(),
        })
        .collect()
}

/// Adds one to the usage count of exactly the node with `id`. Absent ids are a no-op.
pub fn increment_usage(forest: &[DesktopItem], id: &ItemId) -> Vec<DesktopItem> {
    let (next, _) = rebuild_matching(forest, id, &mut |item| {
        item.usage_count = item.usage_count.saturating_add(1);
    });
    next
}

/// Pre-order traversal of every node, nested folders and their contents included.
pub fn flatten(forest: &[DesktopItem]) -> Vec<&DesktopItem> {
    let mut out = Vec::new();
    flatten_into(forest, &mut out);
    out
}

fn flatten_into<'a>(forest: &'a [DesktopItem], out: &mut Vec<&'a DesktopItem>) {
    for item in forest {
        out.push(item);
        if let Some(children) = item.children() {
            flatten_into(children, out);
        }
    }
}

/// Recursive count of the folders and shortcuts below `folder`, not counting `folder` itself.
pub fn count_contents(folder: &DesktopItem) -> ContentCounts {
    folder.children().map(count_forest).unwrap_or_default()
}

/// Recursive count of every folder and shortcut in `forest`.
pub fn count_forest(forest: &[DesktopItem]) -> ContentCounts {
    flatten(forest)
        .into_iter()
        .fold(ContentCounts::default(), |mut counts, item| {
            if item.is_folder() {
                counts.folder_count += 1;
            } else {
                counts.shortcut_count += 1;
            }
            counts
        })
}

/// Top `limit` nodes by usage count, descending. Ties keep flatten order.
pub fn most_used(forest: &[DesktopItem], limit: usize) -> Vec<&DesktopItem> {
    let mut ranked = flatten(forest);
    ranked.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
    ranked.truncate(limit);
    ranked
}

fn require_folder(forest: &[DesktopItem], id: &ItemId) -> Result<(), TreeError> {
    match find_by_id(forest, id) {
        None => Err(TreeError::NotFound(id.clone())),
        Some(item) if !item.is_folder() => Err(TreeError::NotAFolder(id.clone())),
        Some(_) => Ok(()),
    }
}

/// Rebuilds `forest`, applying `apply` to the first node with `id`. Returns whether it was hit.
fn rebuild_matching<F>(forest: &[DesktopItem], id: &ItemId, apply: &mut F) -> (Vec<DesktopItem>, bool)
where
    F: FnMut(&mut DesktopItem),
{
    let mut hit = false;
    let mut next = Vec::with_capacity(forest.len());
    for item in forest {
        if hit {
            next.push(item.clone());
            continue;
        }
        if &item.id == id {
            let mut touched = item.clone();
            apply(&mut touched);
            next.push(touched);
            hit = true;
            continue;
        }
        match item.children() {
            Some(children) => {
                let (children, found) = rebuild_matching(children, id, apply);
                hit = found;
                next.push(item.with_children(children));
            }
            None => next.push(item.clone()),
        }
    }
    (next, hit)
}
