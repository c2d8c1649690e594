//! HTML building blocks shared by the renderers.

use pagesmith_compiler_css::SCROLL_CLASS;
use pagesmith_document::{AnimationTrigger, ComponentNode};
use serde_json::Value;

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// URL safe to place in `href`/`src`. Script URLs collapse to `#`.
pub fn safe_url(url: &str) -> String {
    let scheme = url.trim_start().to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") {
        "#".to_string()
    } else {
        url.to_string()
    }
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        && !name.to_ascii_lowercase().starts_with("on")
}

/// An element under construction.
///
/// Attributes render in insertion order, followed by the node-level
/// attributes collected by [`Tag::for_node`] (user attributes and animation
/// markers), so output is stable for a given node.
#[derive(Debug, Clone)]
pub struct Tag {
    name: String,
    attributes: Vec<(String, Option<String>)>,
    trailing: Vec<(String, Option<String>)>,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// A tag carrying everything a node contributes to its root element:
    /// the style namespace class, the user `className`, `customAttributes`
    /// and the markers the animation runtime looks for.
    pub fn for_node(name: &str, node: &ComponentNode) -> Self {
        let animations = &node.props.animations;
        let scroll = animations.iter().any(|a| a.trigger == AnimationTrigger::OnScroll);
        let rearm = animations
            .iter()
            .any(|a| a.trigger == AnimationTrigger::OnScroll && a.options.rearm);
        let click = animations.iter().any(|a| a.trigger == AnimationTrigger::OnClick);

        let mut class = node.style_namespace();
        if scroll {
            class.push(' ');
            class.push_str(SCROLL_CLASS);
        }
        if let Some(extra) = node.props.text("className").map(str::trim).filter(|c| !c.is_empty()) {
            class.push(' ');
            class.push_str(extra);
        }

        let mut tag = Self::new(name).attr("class", class);

        if let Some(custom) = node.props.object("customAttributes") {
            for (key, value) in custom {
                if key == "class" || !is_valid_attribute_name(key) {
                    continue;
                }
                match value {
                    Value::String(s) => tag.trailing.push((key.clone(), Some(s.clone()))),
                    Value::Number(n) => tag.trailing.push((key.clone(), Some(n.to_string()))),
                    Value::Bool(true) => tag.trailing.push((key.clone(), None)),
                    _ => {}
                }
            }
        }

        if scroll {
            tag.trailing.push(("data-animate-scroll".to_string(), None));
        }
        if rearm {
            tag.trailing.push(("data-scroll-rearm".to_string(), None));
        }
        if click {
            tag.trailing.push(("data-animate-click".to_string(), None));
        }

        tag
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), Some(value.into())));
        self
    }

    pub fn attr_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Boolean attribute, present only when `on`.
    pub fn flag(mut self, name: &str, on: bool) -> Self {
        if on {
            self.attributes.push((name.to_string(), None));
        }
        self
    }

    pub fn open(&self) -> String {
        let mut html = format!("<{}", self.name);
        for (name, value) in self.attributes.iter().chain(self.trailing.iter()) {
            html.push(' ');
            html.push_str(name);
            if let Some(value) = value {
                html.push_str("=\"");
                html.push_str(&escape_html(value));
                html.push('"');
            }
        }
        html.push('>');
        html
    }

    pub fn close(&self) -> String {
        format!("</{}>", self.name)
    }

    /// Element with escaped text content on one line.
    pub fn text(&self, text: &str) -> String {
        format!("{}{}{}\n", self.open(), escape_html(text), self.close())
    }

    /// Element wrapping already-rendered HTML on its own lines.
    pub fn block(&self, inner: &str) -> String {
        format!("{}\n{}{}\n", self.open(), inner, self.close())
    }

    /// Void element such as `<img>` or `<hr>`.
    pub fn void(&self) -> String {
        let mut html = self.open();
        html.insert_str(html.len() - 1, " /");
        html.push('\n');
        html
    }
}
