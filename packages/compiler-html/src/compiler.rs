use crate::config::GenerateConfig;
use pagesmith_common::{walk_node, Visitor};
use pagesmith_compiler_css::{
    default_theme, keyframes_css, runtime_script, scroll_hidden_css, theme_block, RESET_CSS,
};
use pagesmith_document::{Animation, AnimationTrigger, ComponentNode};
use pagesmith_registry::markup::escape_html;
use pagesmith_registry::ComponentRegistry;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Errors that can occur during project generation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output of a generation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    /// Body markup, one top-level node after another
    pub html: String,
    pub css: String,
    pub js: String,
    /// Complete standalone document embedding the three above
    pub full_page: String,
}

/// Generate a project with the global component registry.
pub fn generate_project(
    components: &[ComponentNode],
    title: &str,
    config: &GenerateConfig,
) -> Result<GeneratedProject, CompileError> {
    generate_project_with(ComponentRegistry::global(), components, title, config)
}

#[instrument(skip(registry, components, config), fields(roots = components.len()))]
pub fn generate_project_with(
    registry: &ComponentRegistry,
    components: &[ComponentNode],
    title: &str,
    config: &GenerateConfig,
) -> Result<GeneratedProject, CompileError> {
    config.validate()?;

    let mut collector = Collector::new(registry);
    collector.visit_forest(components);

    let html: String = components
        .iter()
        .map(|node| registry.generate_html(node))
        .collect();
    let css = compile_css(registry, components, config, &collector);
    let js = compile_js(config, &collector);
    let full_page = compile_page(title, config, &html, &css, &js);

    info!(
        keyframes = collector.keyframes.len(),
        html_bytes = html.len(),
        css_bytes = css.len(),
        js_bytes = js.len(),
        "generated project"
    );

    Ok(GeneratedProject {
        html,
        css,
        js,
        full_page,
    })
}

/// Gathers everything the stylesheet and script need from the tree in one
/// pre-order pass. Subtrees of unregistered types are skipped, matching
/// their empty markup.
struct Collector<'a> {
    registry: &'a ComponentRegistry,
    keyframes: Vec<String>,
    keyframe_names: BTreeSet<String>,
    node_scripts: Vec<String>,
    has_scroll: bool,
    has_click: bool,
}

impl<'a> Collector<'a> {
    fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            registry,
            keyframes: Vec::new(),
            keyframe_names: BTreeSet::new(),
            node_scripts: Vec::new(),
            has_scroll: false,
            has_click: false,
        }
    }
}

impl Visitor for Collector<'_> {
    fn visit_node(&mut self, node: &ComponentNode) {
        if !self.registry.contains(&node.component_type) {
            return;
        }

        let script = node
            .props
            .custom_code
            .as_ref()
            .and_then(|code| code.javascript.as_deref())
            .map(str::trim)
            .filter(|code| !code.is_empty());
        if let Some(script) = script {
            self.node_scripts.push(scoped_script(node, script));
        }

        if self.registry.accepts_children(&node.component_type) {
            walk_node(self, node);
        } else {
            // Children of a leaf are never rendered
            for animation in &node.props.animations {
                self.visit_animation(node, animation);
            }
        }
    }

    fn visit_animation(&mut self, node: &ComponentNode, animation: &Animation) {
        match animation.trigger {
            AnimationTrigger::OnScroll => self.has_scroll = true,
            AnimationTrigger::OnClick => self.has_click = true,
            _ => {}
        }

        let name = animation.keyframes_name();
        if self.keyframe_names.insert(name.clone()) {
            self.keyframes.push(keyframes_css(animation));
        } else {
            debug!(id = %node.id, keyframes = %name, "duplicate animation id, keeping first");
        }
    }
}

/// Wrap a node's script so `el` refers to the node's element.
///
/// The element is found by class name, which needs no CSS escaping; the
/// name itself is written as a JSON string literal.
fn scoped_script(node: &ComponentNode, script: &str) -> String {
    let class_name = Value::from(node.style_namespace())
        .to_string()
        .replace('<', "\\u003c");
    format!(
        "(function (el) {{\n  if (!el) return;\n{}\n}})(document.getElementsByClassName({})[0]);\n",
        script, class_name
    )
}

fn non_empty(code: Option<&str>) -> Option<&str> {
    code.map(str::trim).filter(|c| !c.is_empty())
}

fn compile_css(
    registry: &ComponentRegistry,
    components: &[ComponentNode],
    config: &GenerateConfig,
    collector: &Collector<'_>,
) -> String {
    let mut css = String::from(RESET_CSS);

    if config.include_theme {
        if config.theme_variables.is_empty() {
            css.push_str(&theme_block(&default_theme()));
        } else {
            css.push_str(&theme_block(&config.theme_variables));
        }
    }

    for node in components {
        css.push_str(&registry.generate_css(node));
    }

    if collector.has_scroll {
        css.push_str(&scroll_hidden_css());
    }
    for keyframes in &collector.keyframes {
        css.push_str(keyframes);
    }

    if let Some(global) = non_empty(config.global_custom_code.css.as_deref()) {
        css.push_str(global);
        css.push('\n');
    }

    css
}

fn compile_js(config: &GenerateConfig, collector: &Collector<'_>) -> String {
    let mut js = runtime_script(
        config.scroll_threshold,
        collector.has_scroll,
        collector.has_click,
    );

    for script in &collector.node_scripts {
        js.push_str(script);
    }

    if let Some(global) = non_empty(config.global_custom_code.javascript.as_deref()) {
        js.push_str(global);
        js.push('\n');
    }

    js
}

struct Context {
    indent: String,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            indent: "  ".to_string(),
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        self.add_indent();
        self.add(text);
        self.add("\n");
    }

    /// Pre-rendered block, written as-is.
    fn add_block(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.add(text);
        if !text.ends_with('\n') {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

fn compile_page(title: &str, config: &GenerateConfig, html: &str, css: &str, js: &str) -> String {
    let mut ctx = Context::new();

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    if let Some(head) = non_empty(config.head_html.as_deref()) {
        ctx.add_block(head);
    }
    ctx.add_line("<style>");
    ctx.add_block(css);
    ctx.add_line("</style>");
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.add_block(html);
    if !js.is_empty() {
        ctx.indent();
        ctx.add_line("<script>");
        ctx.add_block(js);
        ctx.add_line("</script>");
        ctx.dedent();
    }
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}
