use pagesmith_document::{Breakpoint, ResponsiveStyles, StyleMap};
use tracing::debug;

/// Convert a style property name to its CSS form.
///
/// `backgroundColor` becomes `background-color`, `WebkitTransform` becomes
/// `-webkit-transform`. Custom properties and names that are already
/// kebab-case pass through unchanged.
pub fn to_kebab_case(property: &str) -> String {
    if property.starts_with("--") || !property.chars().any(|c| c.is_ascii_uppercase()) {
        return property.to_string();
    }

    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    // `msTransform` has no leading capital but is still a vendor prefix
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

/// CSS rule with selector and properties
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub selector: String,
    pub properties: Vec<(String, String)>,
    pub media_query: Option<String>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            properties: Vec::new(),
            media_query: None,
        }
    }

    /// A rule built from a style map, with property names converted.
    pub fn from_styles(selector: impl Into<String>, styles: &StyleMap) -> Self {
        let mut rule = Self::new(selector);
        for (property, value) in styles {
            rule.properties.push((to_kebab_case(property), value.clone()));
        }
        rule
    }

    pub fn with_property(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((property.into(), value.into()));
        self
    }

    pub fn with_media_query(mut self, media_query: impl Into<String>) -> Self {
        self.media_query = Some(media_query.into());
        self
    }

    /// Convert to CSS text
    pub fn to_css(&self) -> String {
        let indent = if self.media_query.is_some() { "  " } else { "" };
        let mut css = String::new();

        if let Some(media) = &self.media_query {
            css.push_str(media);
            css.push_str(" {\n");
        }

        css.push_str(indent);
        css.push_str(&self.selector);
        css.push_str(" {\n");
        for (key, value) in &self.properties {
            css.push_str(indent);
            css.push_str("  ");
            css.push_str(key);
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }
        css.push_str(indent);
        css.push_str("}\n");

        if self.media_query.is_some() {
            css.push_str("}\n");
        }
        css.push('\n');
        css
    }
}

pub fn render_rule(selector: &str, styles: &StyleMap) -> String {
    CssRule::from_styles(selector, styles).to_css()
}

fn media_query(breakpoint: Breakpoint) -> String {
    format!("@media (min-width: {}px)", breakpoint.min_width_px())
}

/// Rules for a node's responsive styles: the base rule, then one media
/// rule per non-empty breakpoint overlay in ascending width order.
///
/// Overlay keys that are not breakpoints are skipped.
pub fn responsive_rules(selector: &str, styles: &ResponsiveStyles) -> Vec<CssRule> {
    let mut rules = vec![CssRule::from_styles(selector, &styles.base)];

    for breakpoint in Breakpoint::ALL {
        if let Some(overlay) = styles.get(breakpoint).filter(|s| !s.is_empty()) {
            rules.push(CssRule::from_styles(selector, overlay).with_media_query(media_query(breakpoint)));
        }
    }

    for key in styles.overrides.keys() {
        if Breakpoint::from_key(key).is_none() {
            debug!(selector, key = %key, "skipping unknown breakpoint");
        }
    }

    rules
}

pub fn resolve_styles(selector: &str, styles: &ResponsiveStyles) -> String {
    responsive_rules(selector, styles)
        .iter()
        .map(CssRule::to_css)
        .collect()
}
