use crate::builtin;
use crate::definition::{ComponentDefinition, DefinitionSummary, Variant};
use crate::diagnostic::Diagnostic;
use pagesmith_compiler_css::trigger_css;
use pagesmith_document::{ComponentNode, ComponentType, NodeId};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

static GLOBAL: LazyLock<ComponentRegistry> = LazyLock::new(ComponentRegistry::builtin);

/// Table of component definitions keyed by type.
///
/// Iteration follows [`ComponentType`] ordering, which is palette order for
/// the built-in types.
pub struct ComponentRegistry {
    definitions: BTreeMap<ComponentType, ComponentDefinition>,
}

impl ComponentRegistry {
    /// The process-wide registry of built-in components.
    pub fn global() -> &'static ComponentRegistry {
        &GLOBAL
    }

    /// A fresh registry holding every built-in component.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for definition in builtin::definitions() {
            registry.register(definition);
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            definitions: BTreeMap::new(),
        }
    }

    /// Add a definition, replacing any previous one for the same type.
    pub fn register(&mut self, definition: ComponentDefinition) -> Option<ComponentDefinition> {
        self.definitions
            .insert(definition.component_type.clone(), definition)
    }

    pub fn get(&self, component_type: &ComponentType) -> Option<&ComponentDefinition> {
        self.definitions.get(component_type)
    }

    pub fn contains(&self, component_type: &ComponentType) -> bool {
        self.definitions.contains_key(component_type)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// `false` for unknown types.
    pub fn accepts_children(&self, component_type: &ComponentType) -> bool {
        self.get(component_type)
            .map(|d| d.accepts_children)
            .unwrap_or(false)
    }

    /// A new node populated from the type's defaults. Defaults are cloned,
    /// so editing the node never touches the definition.
    pub fn instantiate(&self, component_type: &ComponentType, id: NodeId) -> Option<ComponentNode> {
        let definition = self.get(component_type)?;
        let node = if definition.accepts_children {
            ComponentNode::container(id, component_type.clone())
        } else {
            ComponentNode::new(id, component_type.clone())
        };

        let mut node = node
            .with_props(definition.default_props.clone())
            .with_styles(definition.default_styles.clone());
        node.display_name = definition.display_name.clone();
        Some(node)
    }

    pub fn variant(&self, component_type: &ComponentType, name: &str) -> Option<&Variant> {
        self.get(component_type)?.find_variant(name)
    }

    /// Check a node against its definition. Does not descend into children.
    pub fn validate(&self, node: &ComponentNode) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let Some(definition) = self.get(&node.component_type) else {
            diagnostics.push(
                Diagnostic::error(
                    "unknown-type",
                    format!("\"{}\" is not a registered component type", node.component_type),
                    &node.id,
                )
                .with_suggestion("This node renders as an empty fragment"),
            );
            return diagnostics;
        };

        match (definition.accepts_children, node.accepts_children()) {
            (false, true) => diagnostics.push(Diagnostic::error(
                "unexpected-children",
                format!("{} does not accept children", definition.display_name),
                &node.id,
            )),
            (true, false) => diagnostics.push(Diagnostic::warning(
                "missing-children",
                format!("{} should carry a children list", definition.display_name),
                &node.id,
            )),
            _ => {}
        }

        for spec in &definition.prop_schema {
            match node.props.get(&spec.key) {
                None if spec.required => {
                    let mut diagnostic = Diagnostic::error(
                        "missing-prop",
                        format!("Required prop \"{}\" is missing", spec.key),
                        &node.id,
                    );
                    if let Some(default) = definition.default_props.get(&spec.key) {
                        diagnostic = diagnostic.with_suggestion(format!("Default is {}", default));
                    }
                    diagnostics.push(diagnostic);
                }
                Some(value) if !spec.accepts(value) => {
                    let mut diagnostic = Diagnostic::warning(
                        "prop-type",
                        format!("Prop \"{}\" should be {:?}, found {}", spec.key, spec.kind, value),
                        &node.id,
                    );
                    if !spec.choices.is_empty() {
                        diagnostic =
                            diagnostic.with_suggestion(format!("One of: {}", spec.choices.join(", ")));
                    }
                    diagnostics.push(diagnostic);
                }
                _ => {}
            }
        }

        for key in node.props.values.keys() {
            if definition.prop_spec(key).is_none() {
                diagnostics.push(Diagnostic::info(
                    "unknown-prop",
                    format!("Prop \"{}\" is not used by {}", key, definition.display_name),
                    &node.id,
                ));
            }
        }

        diagnostics
    }

    /// [`ComponentRegistry::validate`] over a whole forest, in document order.
    pub fn validate_tree(&self, roots: &[ComponentNode]) -> Vec<Diagnostic> {
        roots
            .iter()
            .flat_map(|node| {
                let mut diagnostics = self.validate(node);
                diagnostics.extend(self.validate_tree(node.children()));
                diagnostics
            })
            .collect()
    }

    /// Markup for a node and its subtree. Unknown types render as an empty
    /// string.
    pub fn generate_html(&self, node: &ComponentNode) -> String {
        match self.get(&node.component_type) {
            Some(definition) => definition.renderer.generate_html(node, self),
            None => {
                warn!(
                    id = %node.id,
                    component_type = %node.component_type,
                    "no renderer registered, skipping node"
                );
                String::new()
            }
        }
    }

    pub fn children_html(&self, node: &ComponentNode) -> String {
        node.children()
            .iter()
            .map(|child| self.generate_html(child))
            .collect()
    }

    /// Stylesheet for a node and its subtree, in document order. Each node
    /// contributes its responsive rules, its animation trigger rules and
    /// then its custom CSS.
    pub fn generate_css(&self, node: &ComponentNode) -> String {
        let Some(definition) = self.get(&node.component_type) else {
            debug!(id = %node.id, component_type = %node.component_type, "no styles for unknown type");
            return String::new();
        };

        let mut css = definition.renderer.generate_css(node);
        css.push_str(&trigger_css(&node.selector(), &node.props.animations));

        let custom = node
            .props
            .custom_code
            .as_ref()
            .and_then(|code| code.css.as_deref())
            .map(str::trim)
            .filter(|code| !code.is_empty());
        if let Some(custom) = custom {
            css.push_str(custom);
            css.push_str("\n\n");
        }

        // Leaf renderers never emit children, so neither do their styles
        if definition.accepts_children {
            for child in node.children() {
                css.push_str(&self.generate_css(child));
            }
        }
        css
    }

    /// Bring every known node's children list in line with its definition.
    /// Containers missing the list get an empty one and leaves lose an empty
    /// one. A leaf that really carries children keeps them for `validate`
    /// to report. Returns the number of nodes changed.
    pub fn normalize_children(&self, roots: &mut [ComponentNode]) -> usize {
        let mut fixed = 0;
        for node in roots.iter_mut() {
            if let Some(definition) = self.get(&node.component_type) {
                let populated = node.children.as_ref().map(|children| !children.is_empty());
                match (definition.accepts_children, populated) {
                    (true, None) => {
                        node.children = Some(Vec::new());
                        fixed += 1;
                    }
                    (false, Some(false)) => {
                        node.children = None;
                        fixed += 1;
                    }
                    (false, Some(true)) => {
                        warn!(id = %node.id, component_type = %node.component_type, "leaf node carries children");
                    }
                    _ => {}
                }
            }
            if let Some(children) = node.children.as_mut() {
                fixed += self.normalize_children(children);
            }
        }
        fixed
    }

    /// Serializable summary of every definition, for UI layers and tooling.
    pub fn table(&self) -> Vec<DefinitionSummary> {
        self.definitions().map(ComponentDefinition::summary).collect()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("definitions", &format!("{} definitions", self.definitions.len()))
            .finish()
    }
}
