//! Built-in component definitions, in palette order.

use crate::definition::{Category, ComponentDefinition, PropKind, PropSpec, Variant};
use crate::renderers::*;
use pagesmith_document::{style_map, Breakpoint, ComponentType, Props, ResponsiveStyles};
use serde_json::json;

fn base<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> ResponsiveStyles {
    ResponsiveStyles::new(style_map(pairs))
}

/// Props every type understands.
fn with_common_props(def: ComponentDefinition) -> ComponentDefinition {
    def.prop(PropSpec::optional("className", PropKind::Text))
        .prop(PropSpec::optional("customAttributes", PropKind::Object))
}

pub fn definitions() -> Vec<ComponentDefinition> {
    vec![
        container(),
        section(),
        grid(),
        flex(),
        hero(),
        form(),
        heading(),
        text(),
        button(),
        link(),
        image(),
        video(),
        list(),
        input(),
        textarea(),
        select(),
        checkbox(),
        divider(),
        spacer(),
    ]
    .into_iter()
    .map(with_common_props)
    .collect()
}

// Layout

fn container() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Container,
        Category::Layout,
        "box",
        Box::new(ContainerRenderer { tag: "div" }),
    )
    .with_children()
    .styles(base([("maxWidth", "1200px"), ("margin", "0 auto"), ("padding", "1rem")]))
    .variant(Variant::new(
        "card",
        base([
            ("padding", "1.5rem"),
            ("borderRadius", "var(--radius, 0.5rem)"),
            ("backgroundColor", "var(--background, #ffffff)"),
            ("boxShadow", "0 1px 3px rgba(0, 0, 0, 0.1)"),
        ]),
    ))
    .variant(Variant::new(
        "bordered",
        base([
            ("padding", "1.5rem"),
            ("border", "1px solid var(--border, #e2e8f0)"),
            ("borderRadius", "var(--radius, 0.5rem)"),
        ]),
    ))
}

fn section() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Section,
        Category::Layout,
        "layout",
        Box::new(ContainerRenderer { tag: "section" }),
    )
    .with_children()
    .styles(
        base([("padding", "3rem 1rem")])
            .with_override(Breakpoint::Md, style_map([("padding", "5rem 2rem")])),
    )
    .variant(Variant::new(
        "muted",
        base([("padding", "3rem 1rem"), ("backgroundColor", "var(--muted, #f1f5f9)")]),
    ))
    .variant(Variant::new(
        "dark",
        base([
            ("padding", "3rem 1rem"),
            ("backgroundColor", "var(--foreground, #0f172a)"),
            ("color", "var(--background, #ffffff)"),
        ]),
    ))
}

fn grid() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Grid,
        Category::Layout,
        "grid",
        Box::new(ContainerRenderer { tag: "div" }),
    )
    .with_children()
    .styles(
        base([
            ("display", "grid"),
            ("gridTemplateColumns", "repeat(1, minmax(0, 1fr))"),
            ("gap", "1.5rem"),
        ])
        .with_override(
            Breakpoint::Md,
            style_map([("gridTemplateColumns", "repeat(2, minmax(0, 1fr))")]),
        )
        .with_override(
            Breakpoint::Lg,
            style_map([("gridTemplateColumns", "repeat(3, minmax(0, 1fr))")]),
        ),
    )
    .variant(Variant::new(
        "twoColumn",
        base([
            ("display", "grid"),
            ("gridTemplateColumns", "repeat(2, minmax(0, 1fr))"),
            ("gap", "1.5rem"),
        ]),
    ))
    .variant(Variant::new(
        "fourColumn",
        base([
            ("display", "grid"),
            ("gridTemplateColumns", "repeat(4, minmax(0, 1fr))"),
            ("gap", "1rem"),
        ]),
    ))
}

fn flex() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Flex,
        Category::Layout,
        "columns",
        Box::new(ContainerRenderer { tag: "div" }),
    )
    .with_children()
    .styles(base([("display", "flex"), ("alignItems", "center"), ("gap", "1rem")]))
    .variant(Variant::new(
        "column",
        base([("display", "flex"), ("flexDirection", "column"), ("gap", "1rem")]),
    ))
    .variant(Variant::new(
        "spaceBetween",
        base([
            ("display", "flex"),
            ("alignItems", "center"),
            ("justifyContent", "space-between"),
        ]),
    ))
}

fn hero() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Hero,
        Category::Layout,
        "star",
        Box::new(HeroRenderer),
    )
    .with_children()
    .props(
        Props::new()
            .with("title", "Build something people love")
            .with("subtitle", "A short sentence that explains what you do."),
    )
    .styles(
        base([("padding", "4rem 1rem"), ("textAlign", "center")])
            .with_override(Breakpoint::Lg, style_map([("padding", "8rem 2rem")])),
    )
    .prop(PropSpec::optional("title", PropKind::Text))
    .prop(PropSpec::optional("subtitle", PropKind::Text))
    .variant(Variant::new(
        "gradient",
        base([
            ("padding", "4rem 1rem"),
            ("textAlign", "center"),
            ("color", "#ffffff"),
            ("background", "linear-gradient(135deg, var(--primary, #3b82f6), var(--accent, #f59e0b))"),
        ]),
    ))
    .variant(Variant::new(
        "left",
        base([("padding", "4rem 1rem"), ("textAlign", "left")]),
    ))
}

fn form() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Form,
        Category::Form,
        "file-text",
        Box::new(FormRenderer),
    )
    .with_children()
    .props(Props::new().with("action", "#").with("method", "post"))
    .styles(base([("display", "flex"), ("flexDirection", "column"), ("gap", "1rem")]))
    .prop(PropSpec::optional("action", PropKind::Url))
    .prop(PropSpec::choice("method", &["get", "post"]))
}

// Typography

fn heading() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Heading,
        Category::Typography,
        "heading",
        Box::new(HeadingRenderer),
    )
    .props(Props::new().with("content", "Heading").with("level", 2))
    .styles(
        base([("fontSize", "1.875rem"), ("fontWeight", "700"), ("margin", "0 0 1rem")])
            .with_override(Breakpoint::Md, style_map([("fontSize", "2.25rem")])),
    )
    .prop(PropSpec::required("content", PropKind::Text))
    .prop(PropSpec::optional("level", PropKind::Number))
    .variant(Variant::new(
        "display",
        base([("fontSize", "3rem"), ("fontWeight", "800"), ("lineHeight", "1.1")]),
    ))
    .variant(Variant::new(
        "eyebrow",
        base([
            ("fontSize", "0.875rem"),
            ("fontWeight", "600"),
            ("letterSpacing", "0.05em"),
            ("textTransform", "uppercase"),
        ]),
    ))
}

fn text() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Text,
        Category::Typography,
        "type",
        Box::new(TextRenderer { tag: "p" }),
    )
    .props(Props::new().with("content", "Add your text here"))
    .styles(base([("fontSize", "1rem"), ("lineHeight", "1.6"), ("margin", "0 0 1rem")]))
    .prop(PropSpec::required("content", PropKind::Text))
    .variant(Variant::new(
        "lead",
        base([("fontSize", "1.25rem"), ("lineHeight", "1.6")]),
    ))
    .variant(Variant::new(
        "muted",
        base([("fontSize", "0.875rem"), ("color", "#64748b")]),
    ))
}

// Interactive

fn button() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Button,
        Category::Interactive,
        "mouse-pointer",
        Box::new(ButtonRenderer),
    )
    .props(Props::new().with("content", "Click me").with("buttonType", "button"))
    .styles(base([
        ("padding", "0.75rem 1.5rem"),
        ("backgroundColor", "var(--primary, #3b82f6)"),
        ("color", "#ffffff"),
        ("border", "none"),
        ("borderRadius", "var(--radius, 0.5rem)"),
        ("cursor", "pointer"),
    ]))
    .prop(PropSpec::required("content", PropKind::Text))
    .prop(PropSpec::choice("buttonType", &["button", "submit", "reset"]))
    .prop(PropSpec::optional("disabled", PropKind::Boolean))
    .variant(Variant::new(
        "secondary",
        base([
            ("padding", "0.75rem 1.5rem"),
            ("backgroundColor", "var(--secondary, #64748b)"),
            ("color", "#ffffff"),
            ("border", "none"),
            ("borderRadius", "var(--radius, 0.5rem)"),
        ]),
    ))
    .variant(Variant::new(
        "outline",
        base([
            ("padding", "0.75rem 1.5rem"),
            ("backgroundColor", "transparent"),
            ("color", "var(--primary, #3b82f6)"),
            ("border", "1px solid currentColor"),
            ("borderRadius", "var(--radius, 0.5rem)"),
        ]),
    ))
    .variant(Variant::new(
        "ghost",
        base([
            ("padding", "0.75rem 1.5rem"),
            ("backgroundColor", "transparent"),
            ("color", "inherit"),
            ("border", "none"),
        ]),
    ))
}

fn link() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Link,
        Category::Interactive,
        "link",
        Box::new(LinkRenderer),
    )
    .props(
        Props::new()
            .with("content", "Learn more")
            .with("href", "#")
            .with("target", "_self"),
    )
    .styles(base([("color", "var(--primary, #3b82f6)"), ("textDecoration", "underline")]))
    .prop(PropSpec::required("content", PropKind::Text))
    .prop(PropSpec::required("href", PropKind::Url))
    .prop(PropSpec::choice("target", &["_self", "_blank"]))
    .variant(Variant::new("plain", base([("color", "inherit"), ("textDecoration", "none")])))
}

// Media

fn image() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Image,
        Category::Media,
        "image",
        Box::new(ImageRenderer),
    )
    .props(
        Props::new()
            .with("src", "https://placehold.co/800x450")
            .with("alt", "Placeholder image"),
    )
    .styles(base([("maxWidth", "100%"), ("height", "auto")]))
    .prop(PropSpec::required("src", PropKind::Url))
    .prop(PropSpec::optional("alt", PropKind::Text))
    .prop(PropSpec::optional("width", PropKind::Number))
    .prop(PropSpec::optional("height", PropKind::Number))
    .variant(Variant::new(
        "rounded",
        base([("maxWidth", "100%"), ("height", "auto"), ("borderRadius", "var(--radius, 0.5rem)")]),
    ))
    .variant(Variant::new(
        "circle",
        base([
            ("width", "8rem"),
            ("height", "8rem"),
            ("objectFit", "cover"),
            ("borderRadius", "9999px"),
        ]),
    ))
}

fn video() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Video,
        Category::Media,
        "video",
        Box::new(VideoRenderer),
    )
    .props(Props::new().with("src", "").with("controls", true))
    .styles(base([("width", "100%"), ("height", "auto")]))
    .prop(PropSpec::required("src", PropKind::Url))
    .prop(PropSpec::optional("poster", PropKind::Url))
    .prop(PropSpec::optional("controls", PropKind::Boolean))
    .prop(PropSpec::optional("autoplay", PropKind::Boolean))
    .prop(PropSpec::optional("muted", PropKind::Boolean))
    .prop(PropSpec::optional("loop", PropKind::Boolean))
}

fn list() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::List,
        Category::Typography,
        "list",
        Box::new(ListRenderer),
    )
    .props(
        Props::new()
            .with("items", json!(["First item", "Second item", "Third item"]))
            .with("ordered", false),
    )
    .styles(base([("paddingLeft", "1.5rem"), ("margin", "0 0 1rem")]))
    .prop(PropSpec::required("items", PropKind::List))
    .prop(PropSpec::optional("ordered", PropKind::Boolean))
    .variant(Variant::new("unstyled", base([("listStyle", "none"), ("paddingLeft", "0")])))
}

// Form

fn field_styles() -> ResponsiveStyles {
    base([
        ("width", "100%"),
        ("padding", "0.5rem 0.75rem"),
        ("border", "1px solid var(--border, #e2e8f0)"),
        ("borderRadius", "var(--radius, 0.5rem)"),
    ])
}

fn input() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Input,
        Category::Form,
        "text-cursor-input",
        Box::new(InputRenderer),
    )
    .props(
        Props::new()
            .with("inputType", "text")
            .with("name", "")
            .with("placeholder", "Enter text"),
    )
    .styles(field_styles())
    .prop(PropSpec::choice(
        "inputType",
        &["text", "email", "password", "number", "tel", "url", "date"],
    ))
    .prop(PropSpec::optional("name", PropKind::Text))
    .prop(PropSpec::optional("placeholder", PropKind::Text))
    .prop(PropSpec::optional("value", PropKind::Text))
    .prop(PropSpec::optional("required", PropKind::Boolean))
}

fn textarea() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Textarea,
        Category::Form,
        "align-left",
        Box::new(TextareaRenderer),
    )
    .display_name("Text Area")
    .props(
        Props::new()
            .with("name", "")
            .with("placeholder", "Enter a message")
            .with("rows", 4),
    )
    .styles(field_styles())
    .prop(PropSpec::optional("name", PropKind::Text))
    .prop(PropSpec::optional("placeholder", PropKind::Text))
    .prop(PropSpec::optional("rows", PropKind::Number))
    .prop(PropSpec::optional("value", PropKind::Text))
    .prop(PropSpec::optional("required", PropKind::Boolean))
}

fn select() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Select,
        Category::Form,
        "chevron-down",
        Box::new(SelectRenderer),
    )
    .props(
        Props::new()
            .with("name", "")
            .with("placeholder", "Select an option")
            .with("options", json!(["Option 1", "Option 2", "Option 3"])),
    )
    .styles(field_styles())
    .prop(PropSpec::required("options", PropKind::List))
    .prop(PropSpec::optional("name", PropKind::Text))
    .prop(PropSpec::optional("placeholder", PropKind::Text))
    .prop(PropSpec::optional("required", PropKind::Boolean))
}

fn checkbox() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Checkbox,
        Category::Form,
        "check-square",
        Box::new(CheckboxRenderer),
    )
    .props(
        Props::new()
            .with("label", "I agree")
            .with("name", "")
            .with("checked", false),
    )
    .styles(base([("display", "inline-flex"), ("alignItems", "center"), ("gap", "0.5rem")]))
    .prop(PropSpec::optional("label", PropKind::Text))
    .prop(PropSpec::optional("name", PropKind::Text))
    .prop(PropSpec::optional("checked", PropKind::Boolean))
    .prop(PropSpec::optional("required", PropKind::Boolean))
}

fn divider() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Divider,
        Category::Layout,
        "minus",
        Box::new(DividerRenderer),
    )
    .styles(base([
        ("border", "none"),
        ("borderTop", "1px solid var(--border, #e2e8f0)"),
        ("margin", "2rem 0"),
    ]))
    .variant(Variant::new(
        "dashed",
        base([
            ("border", "none"),
            ("borderTop", "1px dashed var(--border, #e2e8f0)"),
            ("margin", "2rem 0"),
        ]),
    ))
}

fn spacer() -> ComponentDefinition {
    ComponentDefinition::new(
        ComponentType::Spacer,
        Category::Layout,
        "move-vertical",
        Box::new(SpacerRenderer),
    )
    .styles(base([("height", "2rem")]))
    .variant(Variant::new("large", base([("height", "6rem")])))
}
