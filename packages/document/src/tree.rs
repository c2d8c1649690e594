//! Navigation and structural primitives over a forest of component nodes.
//!
//! Everything is addressed by id. Structural paths are never exposed because
//! they go stale under move and delete.

use crate::node::{ComponentNode, NodeId};
use std::collections::HashSet;

/// Where a node sits: its parent (`None` for the root sequence) and its index
/// among that parent's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub parent: Option<NodeId>,
    pub index: usize,
}

/// Depth-first search, first match wins.
pub fn find_by_id<'a>(roots: &'a [ComponentNode], id: &NodeId) -> Option<&'a ComponentNode> {
    for node in roots {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(node.children(), id) {
            return Some(found);
        }
    }
    None
}

pub fn find_by_id_mut<'a>(
    roots: &'a mut [ComponentNode],
    id: &NodeId,
) -> Option<&'a mut ComponentNode> {
    for node in roots.iter_mut() {
        if &node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_by_id_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn contains(roots: &[ComponentNode], id: &NodeId) -> bool {
    find_by_id(roots, id).is_some()
}

pub fn locate(roots: &[ComponentNode], id: &NodeId) -> Option<Location> {
    locate_in(roots, None, id)
}

fn locate_in(nodes: &[ComponentNode], parent: Option<&NodeId>, id: &NodeId) -> Option<Location> {
    if let Some(index) = nodes.iter().position(|n| &n.id == id) {
        return Some(Location {
            parent: parent.cloned(),
            index,
        });
    }
    nodes
        .iter()
        .find_map(|node| locate_in(node.children(), Some(&node.id), id))
}

/// `true` when `id` lives somewhere below `ancestor`.
pub fn is_descendant(roots: &[ComponentNode], ancestor: &NodeId, id: &NodeId) -> bool {
    find_by_id(roots, ancestor)
        .map(|node| contains(node.children(), id))
        .unwrap_or(false)
}

/// Detach a node and its subtree, returning it with the location it had.
pub fn extract(roots: &mut Vec<ComponentNode>, id: &NodeId) -> Option<(Location, ComponentNode)> {
    if let Some(index) = roots.iter().position(|n| &n.id == id) {
        let mut node = roots.remove(index);
        node.parent = None;
        return Some((Location { parent: None, index }, node));
    }
    extract_from_children(roots, id)
}

fn extract_from_children(
    nodes: &mut [ComponentNode],
    id: &NodeId,
) -> Option<(Location, ComponentNode)> {
    for node in nodes.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            if let Some(index) = children.iter().position(|c| &c.id == id) {
                let mut removed = children.remove(index);
                removed.parent = None;
                let location = Location {
                    parent: Some(node.id.clone()),
                    index,
                };
                return Some((location, removed));
            }
            if let Some(found) = extract_from_children(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Insert `node` under `parent` (or into the root sequence) at `index`,
/// clamped to the sibling count; `None` appends.
///
/// Fails when the parent is missing or does not accept children, handing
/// the node back so the caller never loses it.
pub fn insert(
    roots: &mut Vec<ComponentNode>,
    parent: Option<&NodeId>,
    index: Option<usize>,
    mut node: ComponentNode,
) -> Result<Location, ComponentNode> {
    let siblings = match parent {
        None => roots,
        Some(parent_id) => match find_by_id_mut(roots, parent_id).and_then(|p| p.children.as_mut()) {
            Some(children) => children,
            None => return Err(node),
        },
    };

    let at = index.unwrap_or(siblings.len()).min(siblings.len());
    node.parent = parent.cloned();
    siblings.insert(at, node);

    Ok(Location {
        parent: parent.cloned(),
        index: at,
    })
}

/// Recompute every `parent` back-reference with a single walk.
pub fn relink_parents(roots: &mut [ComponentNode]) {
    for node in roots.iter_mut() {
        node.parent = None;
        relink_children(node);
    }
}

fn relink_children(node: &mut ComponentNode) {
    let parent_id = node.id.clone();
    if let Some(children) = node.children.as_mut() {
        for child in children.iter_mut() {
            child.parent = Some(parent_id.clone());
            relink_children(child);
        }
    }
}

/// All ids in pre-order.
pub fn collect_ids(roots: &[ComponentNode]) -> Vec<NodeId> {
    let mut ids = Vec::new();
    collect_into(roots, &mut ids);
    ids
}

fn collect_into(nodes: &[ComponentNode], ids: &mut Vec<NodeId>) {
    for node in nodes {
        ids.push(node.id.clone());
        collect_into(node.children(), ids);
    }
}

pub fn count(roots: &[ComponentNode]) -> usize {
    roots.iter().map(|n| 1 + count(n.children())).sum()
}

/// First id that occurs more than once, if any.
pub fn find_duplicate_id(roots: &[ComponentNode]) -> Option<NodeId> {
    let mut seen = HashSet::new();
    collect_ids(roots).into_iter().find(|id| !seen.insert(id.clone()))
}
