//! One renderer per family of component types.

use crate::markup::{safe_url, Tag};
use crate::registry::ComponentRegistry;
use pagesmith_compiler_css::resolve_styles;
use pagesmith_document::ComponentNode;

/// Turns a node into markup and styles.
///
/// Renderers are pure. Containers render their children through the
/// registry they are given, so a child of an unknown type degrades to an
/// empty fragment without affecting its siblings.
pub trait ComponentRenderer: Send + Sync {
    fn generate_html(&self, node: &ComponentNode, registry: &ComponentRegistry) -> String;

    /// The node's own rules. Children are handled by the registry.
    fn generate_css(&self, node: &ComponentNode) -> String {
        resolve_styles(&node.selector(), &node.styles)
    }
}

/// Plain element wrapping the node's children.
pub struct ContainerRenderer {
    pub tag: &'static str,
}

impl ComponentRenderer for ContainerRenderer {
    fn generate_html(&self, node: &ComponentNode, registry: &ComponentRegistry) -> String {
        Tag::for_node(self.tag, node).block(&registry.children_html(node))
    }
}

pub struct HeroRenderer;

impl ComponentRenderer for HeroRenderer {
    fn generate_html(&self, node: &ComponentNode, registry: &ComponentRegistry) -> String {
        let mut inner = String::new();
        if let Some(title) = node.props.text("title").filter(|t| !t.is_empty()) {
            inner.push_str(&Tag::new("h1").text(title));
        }
        if let Some(subtitle) = node.props.text("subtitle").filter(|t| !t.is_empty()) {
            inner.push_str(&Tag::new("p").text(subtitle));
        }
        inner.push_str(&registry.children_html(node));
        Tag::for_node("section", node).block(&inner)
    }
}

pub struct FormRenderer;

impl ComponentRenderer for FormRenderer {
    fn generate_html(&self, node: &ComponentNode, registry: &ComponentRegistry) -> String {
        Tag::for_node("form", node)
            .attr("action", safe_url(node.props.text_or("action", "#")))
            .attr("method", node.props.text_or("method", "post"))
            .block(&registry.children_html(node))
    }
}

pub struct HeadingRenderer;

impl ComponentRenderer for HeadingRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        let level = node
            .props
            .number("level")
            .map(|l| l.round().clamp(1.0, 6.0) as u8)
            .unwrap_or(2);
        let tag = format!("h{}", level);
        Tag::for_node(&tag, node).text(&node.props.display("content").unwrap_or_default())
    }
}

/// Element holding the node's `content` prop as text.
pub struct TextRenderer {
    pub tag: &'static str,
}

impl ComponentRenderer for TextRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        Tag::for_node(self.tag, node).text(&node.props.display("content").unwrap_or_default())
    }
}

pub struct ButtonRenderer;

impl ComponentRenderer for ButtonRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        Tag::for_node("button", node)
            .attr("type", node.props.text_or("buttonType", "button"))
            .flag("disabled", node.props.flag("disabled"))
            .text(&node.props.display("content").unwrap_or_default())
    }
}

pub struct LinkRenderer;

impl ComponentRenderer for LinkRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        let target = node.props.text("target").filter(|t| !t.is_empty() && *t != "_self");
        let rel = target
            .filter(|t| *t == "_blank")
            .map(|_| "noopener noreferrer");

        Tag::for_node("a", node)
            .attr("href", safe_url(node.props.text_or("href", "#")))
            .attr_opt("target", target)
            .attr_opt("rel", rel)
            .text(&node.props.display("content").unwrap_or_default())
    }
}

pub struct ImageRenderer;

impl ComponentRenderer for ImageRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        Tag::for_node("img", node)
            .attr("src", safe_url(node.props.text_or("src", "")))
            .attr("alt", node.props.text_or("alt", ""))
            .attr_opt("width", node.props.display("width"))
            .attr_opt("height", node.props.display("height"))
            .attr("loading", "lazy")
            .void()
    }
}

pub struct VideoRenderer;

impl ComponentRenderer for VideoRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        let props = &node.props;
        Tag::for_node("video", node)
            .attr("src", safe_url(props.text_or("src", "")))
            .attr_opt("poster", props.text("poster").map(safe_url))
            .flag("controls", props.flag("controls"))
            .flag("autoplay", props.flag("autoplay"))
            // Browsers only autoplay muted video
            .flag("muted", props.flag("muted") || props.flag("autoplay"))
            .flag("loop", props.flag("loop"))
            .flag("playsinline", props.flag("autoplay"))
            .block("")
    }
}

pub struct ListRenderer;

impl ComponentRenderer for ListRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        let tag = if node.props.flag("ordered") { "ol" } else { "ul" };
        let items: String = node
            .props
            .list("items")
            .iter()
            .map(|item| Tag::new("li").text(item))
            .collect();
        Tag::for_node(tag, node).block(&items)
    }
}

pub struct InputRenderer;

impl ComponentRenderer for InputRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        let props = &node.props;
        Tag::for_node("input", node)
            .attr("type", props.text_or("inputType", "text"))
            .attr_opt("name", props.text("name").filter(|n| !n.is_empty()))
            .attr_opt("placeholder", props.text("placeholder"))
            .attr_opt("value", props.display("value"))
            .flag("required", props.flag("required"))
            .void()
    }
}

pub struct TextareaRenderer;

impl ComponentRenderer for TextareaRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        let props = &node.props;
        Tag::for_node("textarea", node)
            .attr_opt("name", props.text("name").filter(|n| !n.is_empty()))
            .attr_opt("placeholder", props.text("placeholder"))
            .attr_opt("rows", props.display("rows"))
            .flag("required", props.flag("required"))
            .text(&props.display("value").unwrap_or_default())
    }
}

pub struct SelectRenderer;

impl ComponentRenderer for SelectRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        let props = &node.props;
        let mut options = String::new();
        if let Some(placeholder) = props.text("placeholder").filter(|p| !p.is_empty()) {
            options.push_str(
                &Tag::new("option")
                    .attr("value", "")
                    .flag("disabled", true)
                    .flag("selected", true)
                    .text(placeholder),
            );
        }
        for option in props.list("options") {
            options.push_str(&Tag::new("option").attr("value", option.as_str()).text(&option));
        }

        Tag::for_node("select", node)
            .attr_opt("name", props.text("name").filter(|n| !n.is_empty()))
            .flag("required", props.flag("required"))
            .block(&options)
    }
}

pub struct CheckboxRenderer;

impl ComponentRenderer for CheckboxRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        let props = &node.props;
        let input = Tag::new("input")
            .attr("type", "checkbox")
            .attr_opt("name", props.text("name").filter(|n| !n.is_empty()))
            .flag("checked", props.flag("checked"))
            .flag("required", props.flag("required"))
            .void();
        let label = Tag::new("span").text(props.text_or("label", ""));
        Tag::for_node("label", node).block(&format!("{}{}", input, label))
    }
}

pub struct DividerRenderer;

impl ComponentRenderer for DividerRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        Tag::for_node("hr", node).void()
    }
}

pub struct SpacerRenderer;

impl ComponentRenderer for SpacerRenderer {
    fn generate_html(&self, node: &ComponentNode, _registry: &ComponentRegistry) -> String {
        Tag::for_node("div", node).attr("aria-hidden", "true").block("")
    }
}
