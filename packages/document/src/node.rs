//! Component nodes: the unit of the page tree.

use crate::animation::Animation;
use crate::props::{CustomCode, Props};
use crate::styles::ResponsiveStyles;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque node identifier, unique across a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

/// Closed set of component types, plus a catch-all that keeps the tag of
/// anything the registry does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Container,
    Section,
    Grid,
    Flex,
    Hero,
    Form,
    Heading,
    Text,
    Button,
    Link,
    Image,
    Video,
    List,
    Input,
    Textarea,
    Select,
    Checkbox,
    Divider,
    Spacer,
    Unknown(String),
}

impl ComponentType {
    /// Every built-in type, in palette order.
    pub const BUILTIN: &'static [ComponentType] = &[
        ComponentType::Container,
        ComponentType::Section,
        ComponentType::Grid,
        ComponentType::Flex,
        ComponentType::Hero,
        ComponentType::Form,
        ComponentType::Heading,
        ComponentType::Text,
        ComponentType::Button,
        ComponentType::Link,
        ComponentType::Image,
        ComponentType::Video,
        ComponentType::List,
        ComponentType::Input,
        ComponentType::Textarea,
        ComponentType::Select,
        ComponentType::Checkbox,
        ComponentType::Divider,
        ComponentType::Spacer,
    ];

    pub fn tag(&self) -> &str {
        match self {
            ComponentType::Container => "container",
            ComponentType::Section => "section",
            ComponentType::Grid => "grid",
            ComponentType::Flex => "flex",
            ComponentType::Hero => "hero",
            ComponentType::Form => "form",
            ComponentType::Heading => "heading",
            ComponentType::Text => "text",
            ComponentType::Button => "button",
            ComponentType::Link => "link",
            ComponentType::Image => "image",
            ComponentType::Video => "video",
            ComponentType::List => "list",
            ComponentType::Input => "input",
            ComponentType::Textarea => "textarea",
            ComponentType::Select => "select",
            ComponentType::Checkbox => "checkbox",
            ComponentType::Divider => "divider",
            ComponentType::Spacer => "spacer",
            ComponentType::Unknown(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        Self::BUILTIN
            .iter()
            .find(|t| t.tag() == tag)
            .cloned()
            .unwrap_or_else(|| ComponentType::Unknown(tag.to_string()))
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, ComponentType::Unknown(_))
    }

    /// Label used when a node arrives without a display name.
    pub fn default_display_name(&self) -> String {
        let tag = self.tag();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Component".to_string(),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for ComponentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ComponentType::from_tag(&tag))
    }
}

/// A single entry in the page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub component_type: ComponentType,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub props: Props,

    #[serde(default)]
    pub styles: ResponsiveStyles,

    /// `Some` only for types that accept children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentNode>>,

    /// Containing node, for lookup only. Never persisted.
    #[serde(skip)]
    pub parent: Option<NodeId>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
}

impl ComponentNode {
    /// A leaf node with empty props and styles.
    pub fn new(id: NodeId, component_type: ComponentType) -> Self {
        let display_name = component_type.default_display_name();
        Self {
            id,
            component_type,
            display_name,
            props: Props::default(),
            styles: ResponsiveStyles::default(),
            children: None,
            parent: None,
            locked: false,
        }
    }

    /// A node that accepts children, starting with none.
    pub fn container(id: NodeId, component_type: ComponentType) -> Self {
        let mut node = Self::new(id, component_type);
        node.children = Some(Vec::new());
        node
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_styles(mut self, styles: ResponsiveStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Append a child. Has no effect on leaf nodes.
    pub fn with_child(mut self, mut child: ComponentNode) -> Self {
        if let Some(children) = self.children.as_mut() {
            child.parent = Some(self.id.clone());
            children.push(child);
        }
        self
    }

    pub fn accepts_children(&self) -> bool {
        self.children.is_some()
    }

    /// Children, or an empty slice for leaf nodes.
    pub fn children(&self) -> &[ComponentNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Class name shared by the generated markup and stylesheet,
    /// e.g. `_heading-1a2b3c-4`.
    pub fn style_namespace(&self) -> String {
        format!("_{}-{}", self.component_type.tag(), self.id)
    }

    /// CSS selector targeting this node.
    pub fn selector(&self) -> String {
        format!(".{}", self.style_namespace())
    }

    /// Shallow-merge the provided fields of `patch` into this node.
    pub fn apply_patch(&mut self, patch: NodePatch) {
        if let Some(name) = patch.display_name {
            self.display_name = name;
        }
        if let Some(values) = patch.props {
            self.props.merge(values);
        }
        if let Some(animations) = patch.animations {
            self.props.animations = animations;
        }
        if let Some(code) = patch.custom_code {
            self.props.custom_code = if code.is_empty() { None } else { Some(code) };
        }
        if let Some(styles) = patch.styles {
            self.styles = styles;
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
    }
}

/// Partial update for [`ComponentNode::apply_patch`]. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<Vec<Animation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<CustomCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<ResponsiveStyles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl NodePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn styles(mut self, styles: ResponsiveStyles) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &NodePatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::style_map;

    #[test]
    fn test_component_type_tags_roundtrip() {
        for ty in ComponentType::BUILTIN {
            assert_eq!(&ComponentType::from_tag(ty.tag()), ty);
        }
        assert_eq!(
            ComponentType::from_tag("carousel"),
            ComponentType::Unknown("carousel".to_string())
        );
        assert_eq!(ComponentType::Heading.default_display_name(), "Heading");
    }

    #[test]
    fn test_leaf_nodes_omit_children_in_json() {
        let node = ComponentNode::new(NodeId::new("t1"), ComponentType::Text);
        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("children").is_none());
        assert!(json.get("parent").is_none());
        assert_eq!(json["type"], "text");
        assert_eq!(json["displayName"], "Text");

        let container = ComponentNode::container(NodeId::new("c1"), ComponentType::Container);
        let json = serde_json::to_value(&container).unwrap();
        assert_eq!(json["children"], serde_json::json!([]));
    }

    #[test]
    fn test_with_child_sets_parent_and_ignores_leaves() {
        let child = ComponentNode::new(NodeId::new("t1"), ComponentType::Text);
        let parent = ComponentNode::container(NodeId::new("c1"), ComponentType::Section)
            .with_child(child.clone());
        assert_eq!(parent.children()[0].parent, Some(NodeId::new("c1")));

        let leaf = ComponentNode::new(NodeId::new("b1"), ComponentType::Button).with_child(child);
        assert!(leaf.children().is_empty());
        assert!(!leaf.accepts_children());
    }

    #[test]
    fn test_apply_patch_is_shallow() {
        let mut node = ComponentNode::new(NodeId::new("h1"), ComponentType::Heading)
            .with_props(Props::new().with("content", "Old").with("level", 1))
            .with_styles(ResponsiveStyles::new(style_map([("color", "red")])));

        node.apply_patch(NodePatch::new().prop("content", "Hi").display_name("Title"));

        assert_eq!(node.props.text("content"), Some("Hi"));
        assert_eq!(node.props.number("level"), Some(1.0));
        assert_eq!(node.display_name, "Title");
        assert_eq!(node.styles.base["color"], "red");
    }

    #[test]
    fn test_style_namespace() {
        let node = ComponentNode::new(NodeId::new("abc-3"), ComponentType::Button);
        assert_eq!(node.style_namespace(), "_button-abc-3");
        assert_eq!(node.selector(), "._button-abc-3");
    }
}
