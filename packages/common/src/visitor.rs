use pagesmith_document::{Animation, ComponentNode};

/// Visitor pattern for traversing component trees immutably
///
/// The default implementations walk the whole forest in pre-order (document
/// order). Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_forest(&mut self, roots: &[ComponentNode]) {
        walk_forest(self, roots);
    }

    fn visit_node(&mut self, node: &ComponentNode) {
        walk_node(self, node);
    }

    fn visit_animation(&mut self, _node: &ComponentNode, _animation: &Animation) {
        // Leaf, nothing to walk
    }
}

/// Mutable visitor pattern for transforming component trees
///
/// Same traversal order as [`Visitor`].
pub trait VisitorMut: Sized {
    fn visit_forest_mut(&mut self, roots: &mut [ComponentNode]) {
        walk_forest_mut(self, roots);
    }

    fn visit_node_mut(&mut self, node: &mut ComponentNode) {
        walk_node_mut(self, node);
    }

    fn visit_animation_mut(&mut self, _animation: &mut Animation) {
        // Leaf, nothing to walk
    }
}

// Default walk implementations for immutable visitor

pub fn walk_forest<V: Visitor>(visitor: &mut V, roots: &[ComponentNode]) {
    for node in roots {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &ComponentNode) {
    for animation in &node.props.animations {
        visitor.visit_animation(node, animation);
    }
    for child in node.children() {
        visitor.visit_node(child);
    }
}

// Default walk implementations for mutable visitor

pub fn walk_forest_mut<V: VisitorMut>(visitor: &mut V, roots: &mut [ComponentNode]) {
    for node in roots {
        visitor.visit_node_mut(node);
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut ComponentNode) {
    for animation in &mut node.props.animations {
        visitor.visit_animation_mut(animation);
    }
    if let Some(children) = node.children.as_mut() {
        for child in children {
            visitor.visit_node_mut(child);
        }
    }
}
