use crate::renderers::ComponentRenderer;
use pagesmith_document::{ComponentType, Props, ResponsiveStyles};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Palette grouping of a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Layout,
    Typography,
    Media,
    Form,
    Interactive,
}

/// Named style preset. Applying it replaces a node's styles; it never
/// changes the node's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub name: String,
    pub styles: ResponsiveStyles,
}

impl Variant {
    pub fn new(name: impl Into<String>, styles: ResponsiveStyles) -> Self {
        Self {
            name: name.into(),
            styles,
        }
    }
}

/// Shape a prop value is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropKind {
    Text,
    Number,
    Boolean,
    Url,
    /// Array of strings, or a comma-separated string
    List,
    Object,
    /// One of [`PropSpec::choices`]
    Choice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropSpec {
    pub key: String,
    pub kind: PropKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub required: bool,
}

impl PropSpec {
    pub fn optional(key: impl Into<String>, kind: PropKind) -> Self {
        Self {
            key: key.into(),
            kind,
            choices: Vec::new(),
            required: false,
        }
    }

    pub fn required(key: impl Into<String>, kind: PropKind) -> Self {
        Self {
            required: true,
            ..Self::optional(key, kind)
        }
    }

    pub fn choice(key: impl Into<String>, options: &[&str]) -> Self {
        Self {
            choices: options.iter().map(|s| s.to_string()).collect(),
            ..Self::optional(key, PropKind::Choice)
        }
    }

    /// Whether `value` has the expected shape. Numbers and booleans given
    /// as strings are accepted, matching how the renderers read them.
    pub fn accepts(&self, value: &Value) -> bool {
        match self.kind {
            PropKind::Text | PropKind::Url => value.is_string() || value.is_number(),
            PropKind::Number => {
                value.is_number() || value.as_str().map_or(false, |s| s.trim().parse::<f64>().is_ok())
            }
            PropKind::Boolean => {
                value.is_boolean() || matches!(value.as_str(), Some("true") | Some("false"))
            }
            PropKind::List => value.is_array() || value.is_string(),
            PropKind::Object => value.is_object(),
            PropKind::Choice => value
                .as_str()
                .map_or(false, |s| self.choices.iter().any(|c| c == s)),
        }
    }
}

/// Everything the registry knows about one component type.
pub struct ComponentDefinition {
    pub component_type: ComponentType,
    pub display_name: String,
    pub category: Category,
    pub icon: String,
    pub default_props: Props,
    pub default_styles: ResponsiveStyles,
    pub accepts_children: bool,
    pub variants: Vec<Variant>,
    pub prop_schema: Vec<PropSpec>,
    pub renderer: Box<dyn ComponentRenderer>,
}

impl ComponentDefinition {
    pub fn new(
        component_type: ComponentType,
        category: Category,
        icon: &str,
        renderer: Box<dyn ComponentRenderer>,
    ) -> Self {
        Self {
            display_name: component_type.default_display_name(),
            component_type,
            category,
            icon: icon.to_string(),
            default_props: Props::default(),
            default_styles: ResponsiveStyles::default(),
            accepts_children: false,
            variants: Vec::new(),
            prop_schema: Vec::new(),
            renderer,
        }
    }

    pub fn display_name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }

    pub fn props(mut self, props: Props) -> Self {
        self.default_props = props;
        self
    }

    pub fn styles(mut self, styles: ResponsiveStyles) -> Self {
        self.default_styles = styles;
        self
    }

    pub fn with_children(mut self) -> Self {
        self.accepts_children = true;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn prop(mut self, spec: PropSpec) -> Self {
        self.prop_schema.push(spec);
        self
    }

    pub fn find_variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn prop_spec(&self, key: &str) -> Option<&PropSpec> {
        self.prop_schema.iter().find(|s| s.key == key)
    }

    pub fn summary(&self) -> DefinitionSummary {
        DefinitionSummary {
            component_type: self.component_type.tag().to_string(),
            display_name: self.display_name.clone(),
            category: self.category,
            icon: self.icon.clone(),
            accepts_children: self.accepts_children,
            variants: self.variants.iter().map(|v| v.name.clone()).collect(),
            prop_schema: self.prop_schema.clone(),
        }
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("component_type", &self.component_type)
            .field("category", &self.category)
            .field("accepts_children", &self.accepts_children)
            .field("variants", &self.variants.len())
            .finish()
    }
}

/// Serializable row of the registry table published to UI layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionSummary {
    #[serde(rename = "type")]
    pub component_type: String,
    pub display_name: String,
    pub category: Category,
    pub icon: String,
    pub accepts_children: bool,
    pub variants: Vec<String>,
    pub prop_schema: Vec<PropSpec>,
}
