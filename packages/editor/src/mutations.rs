//! # Tree Mutations
//!
//! Semantic operations on a component forest.
//!
//! ## Contract
//!
//! Every mutation validates before touching the tree, so an `Err` always
//! leaves the forest exactly as it was. The session relies on this to keep
//! failed calls out of the undo history.
//!
//! ### Move
//! - Relocates a node (with its subtree) under a new parent or the root
//! - The index is read against the destination after the node is detached
//! - Fails for a missing or leaf destination, or one inside the moved subtree
//! - A failure after detaching puts the node back where it was
//!
//! ### Duplicate
//! - Deep copy inserted right after the original
//! - Every node and animation in the copy gets a fresh id
//!
//! ### Animation ids
//! Keyframe names derive from animation ids, so an id is unique across the
//! whole forest. An attached animation whose id another node already uses
//! is given a fresh one.

use pagesmith_common::{walk_node_mut, Visitor, VisitorMut};
use pagesmith_document::{
    tree, Animation, Breakpoint, ComponentNode, ComponentType, IdGenerator, NodeId, NodePatch,
    StyleMap,
};
use pagesmith_registry::ComponentRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Intent-preserving edits, one per user action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mutation {
    /// Instantiate a registered type from its defaults
    #[serde(rename_all = "camelCase")]
    InsertComponent {
        component_type: ComponentType,
        parent_id: Option<NodeId>,
        index: Option<usize>,
    },

    #[serde(rename_all = "camelCase")]
    UpdateComponent { node_id: NodeId, patch: NodePatch },

    /// Merge properties into `base` or a breakpoint overlay
    #[serde(rename_all = "camelCase")]
    UpdateStyles {
        node_id: NodeId,
        breakpoint: Option<Breakpoint>,
        styles: StyleMap,
    },

    #[serde(rename_all = "camelCase")]
    ApplyVariant { node_id: NodeId, variant: String },

    #[serde(rename_all = "camelCase")]
    AttachAnimation { node_id: NodeId, animation: Animation },

    #[serde(rename_all = "camelCase")]
    DetachAnimation { node_id: NodeId, animation_id: String },

    #[serde(rename_all = "camelCase")]
    RemoveComponent { node_id: NodeId },

    #[serde(rename_all = "camelCase")]
    MoveComponent {
        node_id: NodeId,
        new_parent_id: Option<NodeId>,
        index: usize,
    },

    #[serde(rename_all = "camelCase")]
    DuplicateComponent { node_id: NodeId },

    /// Drop every component
    ClearAll,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Parent not found: {0}")]
    ParentNotFound(NodeId),

    #[error("Node does not accept children: {0}")]
    NotAContainer(NodeId),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Unknown component type: {0}")]
    UnknownType(String),

    #[error("No variant '{variant}' for {component_type}")]
    UnknownVariant {
        component_type: String,
        variant: String,
    },

    #[error("Animation not found: {0}")]
    AnimationNotFound(String),
}

/// What a mutation needs besides the tree itself
pub struct MutationContext<'a> {
    pub registry: &'a ComponentRegistry,
    pub ids: &'a mut IdGenerator,
}

impl Mutation {
    /// Short label stored with the history entry
    pub fn description(&self) -> String {
        match self {
            Mutation::InsertComponent { component_type, .. } => {
                format!("Insert {}", component_type)
            }
            Mutation::UpdateComponent { .. } => "Update component".to_string(),
            Mutation::UpdateStyles { breakpoint, .. } => match breakpoint {
                Some(bp) => format!("Edit {} styles", bp),
                None => "Edit styles".to_string(),
            },
            Mutation::ApplyVariant { variant, .. } => format!("Apply variant {}", variant),
            Mutation::AttachAnimation { animation, .. } => {
                format!("Add animation {}", animation.name)
            }
            Mutation::DetachAnimation { .. } => "Remove animation".to_string(),
            Mutation::RemoveComponent { .. } => "Delete component".to_string(),
            Mutation::MoveComponent { .. } => "Move component".to_string(),
            Mutation::DuplicateComponent { .. } => "Duplicate component".to_string(),
            Mutation::ClearAll => "Clear project".to_string(),
        }
    }

    /// Apply to the forest.
    ///
    /// Returns the node created (insert, duplicate) or detached (remove).
    pub fn apply(
        &self,
        roots: &mut Vec<ComponentNode>,
        cx: &mut MutationContext<'_>,
    ) -> Result<Option<ComponentNode>, MutationError> {
        match self {
            Mutation::InsertComponent {
                component_type,
                parent_id,
                index,
            } => apply_insert(roots, cx, component_type, parent_id.as_ref(), *index).map(Some),

            Mutation::UpdateComponent { node_id, patch } => {
                node_mut(roots, node_id)?.apply_patch(patch.clone());
                claim_animation_ids(roots, node_id, cx.ids);
                Ok(None)
            }

            Mutation::UpdateStyles {
                node_id,
                breakpoint,
                styles,
            } => {
                node_mut(roots, node_id)?
                    .styles
                    .merge(*breakpoint, styles.clone());
                Ok(None)
            }

            Mutation::ApplyVariant { node_id, variant } => {
                let node = node_mut(roots, node_id)?;
                let preset = cx
                    .registry
                    .variant(&node.component_type, variant)
                    .ok_or_else(|| MutationError::UnknownVariant {
                        component_type: node.component_type.to_string(),
                        variant: variant.clone(),
                    })?;
                node.styles = preset.styles.clone();
                Ok(None)
            }

            Mutation::AttachAnimation { node_id, animation } => {
                let animations = &mut node_mut(roots, node_id)?.props.animations;
                match animations.iter_mut().find(|a| a.id == animation.id) {
                    Some(existing) => *existing = animation.clone(),
                    None => animations.push(animation.clone()),
                }
                claim_animation_ids(roots, node_id, cx.ids);
                Ok(None)
            }

            Mutation::DetachAnimation {
                node_id,
                animation_id,
            } => {
                let animations = &mut node_mut(roots, node_id)?.props.animations;
                let position = animations
                    .iter()
                    .position(|a| &a.id == animation_id)
                    .ok_or_else(|| MutationError::AnimationNotFound(animation_id.clone()))?;
                animations.remove(position);
                Ok(None)
            }

            Mutation::RemoveComponent { node_id } => tree::extract(roots, node_id)
                .map(|(_, node)| Some(node))
                .ok_or_else(|| MutationError::NodeNotFound(node_id.clone())),

            Mutation::MoveComponent {
                node_id,
                new_parent_id,
                index,
            } => {
                apply_move(roots, cx.registry, node_id, new_parent_id.as_ref(), *index)?;
                Ok(None)
            }

            Mutation::DuplicateComponent { node_id } => {
                apply_duplicate(roots, cx.ids, node_id).map(Some)
            }

            Mutation::ClearAll => {
                roots.clear();
                Ok(None)
            }
        }
    }
}

fn node_mut<'a>(
    roots: &'a mut [ComponentNode],
    id: &NodeId,
) -> Result<&'a mut ComponentNode, MutationError> {
    tree::find_by_id_mut(roots, id).ok_or_else(|| MutationError::NodeNotFound(id.clone()))
}

/// A destination is valid when it is the root sequence or an existing
/// node whose type accepts children.
fn check_destination(
    roots: &[ComponentNode],
    registry: &ComponentRegistry,
    parent: Option<&NodeId>,
) -> Result<(), MutationError> {
    let Some(parent_id) = parent else {
        return Ok(());
    };
    let parent = tree::find_by_id(roots, parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
    if !registry.accepts_children(&parent.component_type) {
        return Err(MutationError::NotAContainer(parent_id.clone()));
    }
    Ok(())
}

/// Give a checked destination a children list if it arrived without one.
fn open_destination(roots: &mut [ComponentNode], parent: Option<&NodeId>) {
    if let Some(node) = parent.and_then(|id| tree::find_by_id_mut(roots, id)) {
        node.children.get_or_insert_with(Vec::new);
    }
}

fn apply_insert(
    roots: &mut Vec<ComponentNode>,
    cx: &mut MutationContext<'_>,
    component_type: &ComponentType,
    parent: Option<&NodeId>,
    index: Option<usize>,
) -> Result<ComponentNode, MutationError> {
    if !cx.registry.contains(component_type) {
        return Err(MutationError::UnknownType(component_type.to_string()));
    }
    check_destination(roots, cx.registry, parent)?;

    let node = cx
        .registry
        .instantiate(component_type, cx.ids.new_id())
        .ok_or_else(|| MutationError::UnknownType(component_type.to_string()))?;
    let inserted = node.clone();

    open_destination(roots, parent);
    match tree::insert(roots, parent, index, node) {
        Ok(location) => Ok(ComponentNode {
            parent: location.parent,
            ..inserted
        }),
        Err(_) => Err(MutationError::ParentNotFound(
            parent.cloned().unwrap_or_else(|| inserted.id.clone()),
        )),
    }
}

fn apply_move(
    roots: &mut Vec<ComponentNode>,
    registry: &ComponentRegistry,
    node_id: &NodeId,
    new_parent: Option<&NodeId>,
    index: usize,
) -> Result<(), MutationError> {
    if !tree::contains(roots, node_id) {
        return Err(MutationError::NodeNotFound(node_id.clone()));
    }
    if let Some(parent_id) = new_parent {
        if parent_id == node_id || tree::is_descendant(roots, node_id, parent_id) {
            return Err(MutationError::CycleDetected);
        }
    }
    check_destination(roots, registry, new_parent)?;

    let (origin, node) =
        tree::extract(roots, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
    open_destination(roots, new_parent);

    match tree::insert(roots, new_parent, Some(index), node) {
        Ok(_) => Ok(()),
        Err(node) => {
            // Restore at the original position so the node is never lost
            let _ = tree::insert(roots, origin.parent.as_ref(), Some(origin.index), node);
            Err(MutationError::ParentNotFound(
                new_parent.cloned().unwrap_or_else(|| node_id.clone()),
            ))
        }
    }
}

fn apply_duplicate(
    roots: &mut Vec<ComponentNode>,
    ids: &mut IdGenerator,
    node_id: &NodeId,
) -> Result<ComponentNode, MutationError> {
    let location =
        tree::locate(roots, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
    let mut copy = tree::find_by_id(roots, node_id)
        .cloned()
        .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;

    Reidentify { ids }.visit_node_mut(&mut copy);
    tree::relink_parents(std::slice::from_mut(&mut copy));
    copy.parent = location.parent.clone();

    let inserted = copy.clone();
    tree::insert(roots, location.parent.as_ref(), Some(location.index + 1), copy)
        .map(|_| inserted)
        .map_err(|_| MutationError::NodeNotFound(node_id.clone()))
}

/// Gives every node and animation in a subtree a fresh id.
struct Reidentify<'a> {
    ids: &'a mut IdGenerator,
}

impl VisitorMut for Reidentify<'_> {
    fn visit_node_mut(&mut self, node: &mut ComponentNode) {
        node.id = self.ids.new_id();
        walk_node_mut(self, node);
    }

    fn visit_animation_mut(&mut self, animation: &mut Animation) {
        animation.id = self.ids.new_id().to_string();
    }
}

/// Animation ids already taken, optionally ignoring one node's own.
struct TakenAnimationIds<'a> {
    except: Option<&'a NodeId>,
    taken: HashSet<String>,
}

impl Visitor for TakenAnimationIds<'_> {
    fn visit_animation(&mut self, node: &ComponentNode, animation: &Animation) {
        if self.except != Some(&node.id) {
            self.taken.insert(animation.id.clone());
        }
    }
}

/// Hands out animation ids, re-identifying any that are already taken.
struct UniqueAnimationIds<'a> {
    ids: &'a mut IdGenerator,
    taken: HashSet<String>,
    renamed: usize,
}

impl UniqueAnimationIds<'_> {
    fn claim(&mut self, animation: &mut Animation) {
        if self.taken.insert(animation.id.clone()) {
            return;
        }
        let mut fresh = self.ids.new_id().to_string();
        while self.taken.contains(&fresh) {
            fresh = self.ids.new_id().to_string();
        }
        debug!(from = %animation.id, to = %fresh, "animation id already in use");
        self.taken.insert(fresh.clone());
        animation.id = fresh;
        self.renamed += 1;
    }
}

impl VisitorMut for UniqueAnimationIds<'_> {
    fn visit_animation_mut(&mut self, animation: &mut Animation) {
        self.claim(animation);
    }
}

/// Re-id the animations of `node_id` that clash with another node's (or
/// an earlier one on the same node).
fn claim_animation_ids(roots: &mut [ComponentNode], node_id: &NodeId, ids: &mut IdGenerator) {
    let mut others = TakenAnimationIds {
        except: Some(node_id),
        taken: HashSet::new(),
    };
    others.visit_forest(roots);

    let Some(node) = tree::find_by_id_mut(roots, node_id) else {
        return;
    };
    let mut unique = UniqueAnimationIds {
        ids,
        taken: others.taken,
        renamed: 0,
    };
    for animation in &mut node.props.animations {
        unique.claim(animation);
    }
}

/// Keep the first use of each animation id in document order and re-id
/// the rest. Returns how many were renamed.
pub(crate) fn dedupe_animation_ids(roots: &mut [ComponentNode], ids: &mut IdGenerator) -> usize {
    let mut unique = UniqueAnimationIds {
        ids,
        taken: HashSet::new(),
        renamed: 0,
    };
    unique.visit_forest_mut(roots);
    unique.renamed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_document::{AnimationTrigger, Props};

    fn text(id: &str) -> ComponentNode {
        ComponentNode::new(NodeId::new(id), ComponentType::Text)
    }

    fn forest() -> Vec<ComponentNode> {
        vec![
            ComponentNode::container(NodeId::new("s1"), ComponentType::Section)
                .with_child(text("t1"))
                .with_child(
                    ComponentNode::container(NodeId::new("c1"), ComponentType::Container)
                        .with_child(text("t2")),
                ),
            text("t3"),
        ]
    }

    fn apply(mutation: Mutation, roots: &mut Vec<ComponentNode>) -> Result<Option<ComponentNode>, MutationError> {
        let registry = ComponentRegistry::global();
        let mut ids = IdGenerator::new("mutations");
        let mut cx = MutationContext {
            registry,
            ids: &mut ids,
        };
        mutation.apply(roots, &mut cx)
    }

    #[test]
    fn test_move_into_own_subtree_is_rejected() {
        let mut roots = forest();
        let before = roots.clone();

        let result = apply(
            Mutation::MoveComponent {
                node_id: NodeId::new("s1"),
                new_parent_id: Some(NodeId::new("c1")),
                index: 0,
            },
            &mut roots,
        );

        assert_eq!(result, Err(MutationError::CycleDetected));
        assert_eq!(roots, before);
    }

    #[test]
    fn test_move_into_leaf_leaves_tree_untouched() {
        let mut roots = forest();
        let before = roots.clone();

        let result = apply(
            Mutation::MoveComponent {
                node_id: NodeId::new("t1"),
                new_parent_id: Some(NodeId::new("t3")),
                index: 0,
            },
            &mut roots,
        );

        assert_eq!(result, Err(MutationError::NotAContainer(NodeId::new("t3"))));
        assert_eq!(roots, before);
    }

    #[test]
    fn test_move_to_root() {
        let mut roots = forest();
        apply(
            Mutation::MoveComponent {
                node_id: NodeId::new("t2"),
                new_parent_id: None,
                index: 0,
            },
            &mut roots,
        )
        .unwrap();

        assert_eq!(roots[0].id.as_str(), "t2");
        assert!(roots[0].parent.is_none());
        assert!(tree::find_by_id(&roots, &NodeId::new("c1"))
            .unwrap()
            .children()
            .is_empty());
    }

    #[test]
    fn test_insert_unknown_type_does_not_mint_id() {
        let mut roots = forest();
        let registry = ComponentRegistry::global();
        let mut ids = IdGenerator::new("mutations");
        let mut cx = MutationContext {
            registry,
            ids: &mut ids,
        };

        let result = Mutation::InsertComponent {
            component_type: ComponentType::from_tag("carousel"),
            parent_id: None,
            index: None,
        }
        .apply(&mut roots, &mut cx);

        assert!(matches!(result, Err(MutationError::UnknownType(_))));
        assert_eq!(ids.count(), 0);
    }

    #[test]
    fn test_duplicate_reassigns_animation_ids() {
        let animated = text("a1").with_props(Props {
            animations: vec![Animation::preset("anim-1", "fadeIn", AnimationTrigger::OnLoad)],
            ..Props::default()
        });
        let mut roots = vec![animated];

        let copy = apply(
            Mutation::DuplicateComponent {
                node_id: NodeId::new("a1"),
            },
            &mut roots,
        )
        .unwrap()
        .unwrap();

        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1].id, copy.id);
        assert_ne!(copy.props.animations[0].id, "anim-1");
        assert_eq!(roots[0].props.animations[0].id, "anim-1");
    }

    #[test]
    fn test_destination_follows_registry_not_children_list() {
        let mut roots = vec![
            ComponentNode::new(NodeId::new("s1"), ComponentType::Section),
            ComponentNode::container(NodeId::new("t1"), ComponentType::Text),
        ];
        let heading_under = |parent: &str| Mutation::InsertComponent {
            component_type: ComponentType::Heading,
            parent_id: Some(NodeId::new(parent)),
            index: None,
        };

        let inserted = apply(heading_under("s1"), &mut roots).unwrap().unwrap();
        assert_eq!(inserted.parent, Some(NodeId::new("s1")));
        assert_eq!(roots[0].children().len(), 1);

        assert_eq!(
            apply(heading_under("t1"), &mut roots),
            Err(MutationError::NotAContainer(NodeId::new("t1")))
        );
        assert!(roots[1].children().is_empty());
    }

    #[test]
    fn test_attach_reassigns_id_used_by_another_node() {
        let mut roots = forest();
        let attach = |id: &str, name: &str| Mutation::AttachAnimation {
            node_id: NodeId::new(id),
            animation: Animation::preset("anim", name, AnimationTrigger::OnLoad),
        };

        apply(attach("t1", "fadeIn"), &mut roots).unwrap();
        apply(attach("t2", "spin"), &mut roots).unwrap();

        let first = &tree::find_by_id(&roots, &NodeId::new("t1")).unwrap().props.animations;
        let second = &tree::find_by_id(&roots, &NodeId::new("t2")).unwrap().props.animations;
        assert_eq!(first[0].id, "anim");
        assert_ne!(second[0].id, "anim");
        assert_eq!(second[0].name, "spin");

        // Same id on the same node still replaces
        apply(attach("t1", "pulse"), &mut roots).unwrap();
        let first = &tree::find_by_id(&roots, &NodeId::new("t1")).unwrap().props.animations;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "anim");
        assert_eq!(first[0].name, "pulse");
    }

    #[test]
    fn test_dedupe_keeps_first_in_document_order() {
        let animated = |id: &str| {
            text(id).with_props(Props {
                animations: vec![Animation::preset("anim", "fadeIn", AnimationTrigger::OnLoad)],
                ..Props::default()
            })
        };
        let mut roots = vec![animated("a"), animated("b")];
        let mut ids = IdGenerator::new("mutations");

        assert_eq!(dedupe_animation_ids(&mut roots, &mut ids), 1);
        assert_eq!(roots[0].props.animations[0].id, "anim");
        assert_ne!(roots[1].props.animations[0].id, "anim");
        assert_eq!(dedupe_animation_ids(&mut roots, &mut ids), 0);
    }

    #[test]
    fn test_detach_missing_animation() {
        let mut roots = forest();
        let result = apply(
            Mutation::DetachAnimation {
                node_id: NodeId::new("t1"),
                animation_id: "nope".to_string(),
            },
            &mut roots,
        );
        assert_eq!(
            result,
            Err(MutationError::AnimationNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_serialized_shape() {
        let mutation = Mutation::RemoveComponent {
            node_id: NodeId::new("t1"),
        };
        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json["kind"], "removeComponent");
        assert_eq!(json["nodeId"], "t1");

        let back: Mutation = serde_json::from_value(json).unwrap();
        assert_eq!(back, mutation);
    }
}
