//! Load-time normalization of component trees.
//!
//! Trees read from disk (or pasted from elsewhere) may predate current prop
//! names or lack fields every consumer assumes are present. These functions
//! repair them in place and report how many fixes were applied.

use crate::node::ComponentNode;
use crate::props::Props;
use tracing::debug;

/// Legacy prop key → current prop key.
const RENAMED_PROPS: &[(&str, &str)] = &[("text", "content")];

/// Rename legacy prop keys. A legacy value only fills the current key when
/// that key is absent; the legacy key is always dropped.
///
/// Returns `true` when anything changed.
pub fn migrate_props(props: &mut Props) -> bool {
    let mut changed = false;
    for (legacy, current) in RENAMED_PROPS {
        if let Some(value) = props.remove(legacy) {
            if !props.contains(current) {
                props.set(current, value);
            }
            changed = true;
        }
    }
    changed
}

/// Normalize a single node (not its children).
pub fn normalize_node(node: &mut ComponentNode) -> usize {
    let mut fixes = 0;

    if migrate_props(&mut node.props) {
        debug!(id = %node.id, "migrated legacy props");
        fixes += 1;
    }

    if node.display_name.trim().is_empty() {
        node.display_name = node.component_type.default_display_name();
        fixes += 1;
    }

    let overlays = node.styles.overrides.len();
    node.styles.prune();
    if node.styles.overrides.len() != overlays {
        fixes += 1;
    }

    fixes
}

/// Normalize every node of a forest, depth first.
pub fn normalize_tree(roots: &mut [ComponentNode]) -> usize {
    roots
        .iter_mut()
        .map(|node| {
            let own = normalize_node(node);
            let below = node
                .children
                .as_mut()
                .map(|children| normalize_tree(children))
                .unwrap_or(0);
            own + below
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ComponentType, NodeId};
    use crate::styles::{Breakpoint, ResponsiveStyles, StyleMap};

    #[test]
    fn test_text_migrates_to_content() {
        let mut props = Props::new().with("text", "Legacy");
        assert!(migrate_props(&mut props));
        assert_eq!(props.text("content"), Some("Legacy"));
        assert!(!props.contains("text"));

        // Nothing left to migrate
        assert!(!migrate_props(&mut props));
    }

    #[test]
    fn test_content_wins_over_legacy_text() {
        let mut props = Props::new().with("text", "Old").with("content", "New");
        migrate_props(&mut props);
        assert_eq!(props.text("content"), Some("New"));
        assert!(!props.contains("text"));
    }

    #[test]
    fn test_normalize_tree_backfills_nested_nodes() {
        let mut child = ComponentNode::new(NodeId::new("b1"), ComponentType::Button);
        child.display_name = String::new();
        child.styles = ResponsiveStyles::default().with_override(Breakpoint::Lg, StyleMap::new());

        let mut roots =
            vec![ComponentNode::container(NodeId::new("c1"), ComponentType::Container).with_child(child)];

        assert_eq!(normalize_tree(&mut roots), 2);
        let button = &roots[0].children()[0];
        assert_eq!(button.display_name, "Button");
        assert!(button.styles.overrides.is_empty());

        assert_eq!(normalize_tree(&mut roots), 0);
    }
}
