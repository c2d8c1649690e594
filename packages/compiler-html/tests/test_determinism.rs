/// Determinism tests - generation must be byte-for-byte reproducible
///
/// These tests validate that:
/// - Same tree and config produce identical output across runs
/// - Map ordering in props and styles never leaks into the output
/// - A tree loaded from JSON generates the same output as the original

use pagesmith_compiler_html::{generate_project, GenerateConfig};
use pagesmith_document::{ComponentNode, ComponentType, NodeId, Project};
use pagesmith_registry::ComponentRegistry;
use serde_json::json;

fn landing_page() -> Vec<ComponentNode> {
    let source = json!({
        "id": "landing",
        "components": [
            {
                "id": "hero-1",
                "type": "hero",
                "props": {
                    "title": "Ship faster",
                    "subtitle": "Everything you need",
                    "animations": [
                        { "id": "a1", "name": "fadeInUp", "trigger": "onLoad" }
                    ]
                },
                "styles": {
                    "base": { "padding": "4rem 1rem", "textAlign": "center" },
                    "lg": { "padding": "8rem 2rem" },
                    "sm": { "padding": "5rem 1rem" }
                },
                "children": [
                    {
                        "id": "btn-1",
                        "type": "button",
                        "props": {
                            "content": "Get started",
                            "customAttributes": { "data-z": "1", "data-a": "2" },
                            "animations": [
                                { "id": "a2", "name": "pulse", "trigger": "continuous" },
                                { "id": "a3", "name": "shake", "trigger": "onClick" }
                            ]
                        },
                        "styles": { "base": { "color": "#fff", "backgroundColor": "#000" } }
                    }
                ]
            },
            {
                "id": "grid-1",
                "type": "grid",
                "styles": { "base": { "display": "grid" } },
                "children": [
                    {
                        "id": "text-1",
                        "type": "text",
                        "props": {
                            "content": "Fast",
                            "animations": [
                                { "id": "a4", "name": "zoomIn", "trigger": "onScroll", "options": { "rearm": true } }
                            ]
                        },
                        "styles": { "base": {} }
                    },
                    { "id": "odd-1", "type": "carousel" }
                ]
            }
        ]
    });
    Project::from_json(&source.to_string()).unwrap().components
}

#[test]
fn test_generation_determinism() {
    let components = landing_page();
    let config = GenerateConfig::default();

    let results: Vec<_> = (0..10)
        .map(|_| generate_project(&components, "Landing", &config).unwrap())
        .collect();

    for i in 1..results.len() {
        assert_eq!(
            results[0], results[i],
            "Generation {} differs from generation 0",
            i
        );
    }
}

#[test]
fn test_reloaded_tree_generates_identical_output() {
    let components = landing_page();
    let config = GenerateConfig::default();
    let first = generate_project(&components, "Landing", &config).unwrap();

    let json = Project::new("landing")
        .with_components(components)
        .to_json()
        .unwrap();
    let reloaded = Project::from_json(&json).unwrap();
    let second = generate_project(&reloaded.components, "Landing", &config).unwrap();

    assert_eq!(first.full_page, second.full_page);
}

#[test]
fn test_attribute_and_breakpoint_order_is_stable() {
    let project = generate_project(&landing_page(), "Landing", &GenerateConfig::default()).unwrap();

    let a = project.html.find("data-a=\"2\"").unwrap();
    let z = project.html.find("data-z=\"1\"").unwrap();
    assert!(a < z);

    let hero_sm = project.css.find("@media (min-width: 640px) {\n  ._hero-hero-1").unwrap();
    let hero_lg = project.css.find("@media (min-width: 1024px) {\n  ._hero-hero-1").unwrap();
    assert!(hero_sm < hero_lg);
}

#[test]
fn test_unknown_type_among_siblings() {
    let project = generate_project(&landing_page(), "Landing", &GenerateConfig::default()).unwrap();

    assert!(project.html.contains("_text-text-1"));
    assert!(!project.html.contains("carousel"));
    assert!(!project.css.contains("carousel"));

    // Rendering directly through the registry is equally tolerant
    let unknown = ComponentNode::new(NodeId::new("x"), ComponentType::Unknown("map".into()));
    assert_eq!(ComponentRegistry::global().generate_html(&unknown), "");
}
