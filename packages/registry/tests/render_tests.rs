//! Rendering behaviour of the built-in components

use pagesmith_document::{ComponentNode, ComponentType, NodeId, Props};
use pagesmith_registry::ComponentRegistry;
use serde_json::json;

fn node(ty: ComponentType, id: &str) -> ComponentNode {
    ComponentRegistry::global()
        .instantiate(&ty, NodeId::new(id))
        .unwrap()
}

fn html(node: &ComponentNode) -> String {
    ComponentRegistry::global().generate_html(node)
}

#[test]
fn test_every_builtin_type_renders_its_namespace_class() {
    for ty in ComponentType::BUILTIN {
        let node = node(ty.clone(), "n1");
        let out = html(&node);
        assert!(
            out.contains(&format!("class=\"{}\"", node.style_namespace())),
            "{}: {}",
            ty,
            out
        );
    }
}

#[test]
fn test_heading_level_and_escaping() {
    let mut heading = node(ComponentType::Heading, "h1");
    heading.props.set("content", json!("Fish & <Chips>"));
    heading.props.set("level", json!(9));

    assert_eq!(
        html(&heading),
        "<h6 class=\"_heading-h1\">Fish &amp; &lt;Chips&gt;</h6>\n"
    );
}

#[test]
fn test_link_opening_new_tab_gets_rel() {
    let link = node(ComponentType::Link, "l1").with_props(
        Props::new()
            .with("content", "Docs")
            .with("href", "javascript:alert(1)")
            .with("target", "_blank"),
    );
    assert_eq!(
        html(&link),
        "<a class=\"_link-l1\" href=\"#\" target=\"_blank\" rel=\"noopener noreferrer\">Docs</a>\n"
    );
}

#[test]
fn test_image_is_void_element() {
    let image = node(ComponentType::Image, "i1")
        .with_props(Props::new().with("src", "/cat.png").with("alt", "A \"cat\""));
    assert_eq!(
        html(&image),
        "<img class=\"_image-i1\" src=\"/cat.png\" alt=\"A &quot;cat&quot;\" loading=\"lazy\" />\n"
    );
}

#[test]
fn test_list_items() {
    let list = node(ComponentType::List, "l1").with_props(
        Props::new().with("items", "One, Two").with("ordered", true),
    );
    assert_eq!(
        html(&list),
        "<ol class=\"_list-l1\">\n<li>One</li>\n<li>Two</li>\n</ol>\n"
    );
}

#[test]
fn test_select_placeholder_and_options() {
    let out = html(&node(ComponentType::Select, "s1"));
    assert!(out.contains("<option value=\"\" disabled selected>Select an option</option>"));
    assert!(out.contains("<option value=\"Option 2\">Option 2</option>"));
}

#[test]
fn test_unknown_child_does_not_blank_siblings() {
    let mut inner = node(ComponentType::Section, "s2");
    inner = inner
        .with_child(ComponentNode::new(
            NodeId::new("x1"),
            ComponentType::Unknown("carousel".into()),
        ))
        .with_child(node(ComponentType::Button, "b1"));

    let outer = node(ComponentType::Container, "c1")
        .with_child(inner)
        .with_child(node(ComponentType::Text, "t1"));

    let out = html(&outer);
    assert!(out.contains("_button-b1"));
    assert!(out.contains("_text-t1"));
    assert!(!out.contains("carousel"));

    let css = ComponentRegistry::global().generate_css(&outer);
    assert!(css.contains("._button-b1 {"));
    assert!(!css.contains("carousel"));
}

#[test]
fn test_form_wraps_fields() {
    let form = node(ComponentType::Form, "f1")
        .with_child(node(ComponentType::Input, "i1"))
        .with_child(node(ComponentType::Checkbox, "c1"));

    let out = html(&form);
    assert!(out.starts_with("<form class=\"_form-f1\" action=\"#\" method=\"post\">\n"));
    assert!(out.contains("<input class=\"_input-i1\" type=\"text\" placeholder=\"Enter text\" />"));
    assert!(out.contains("<input type=\"checkbox\" />"));
    assert!(out.ends_with("</form>\n"));
}
