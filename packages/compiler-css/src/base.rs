//! Blocks that open every generated stylesheet.

use crate::style::CssRule;
use std::collections::BTreeMap;

pub const RESET_CSS: &str = "\
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, \"Segoe UI\", Roboto, sans-serif;
  line-height: 1.5;
  -webkit-font-smoothing: antialiased;
}

img, video {
  display: block;
  max-width: 100%;
}

button, input, textarea, select {
  font: inherit;
}

";

/// Palette used when theming is on and no variables are configured.
pub fn default_theme() -> BTreeMap<String, String> {
    [
        ("primary", "#3b82f6"),
        ("secondary", "#64748b"),
        ("accent", "#f59e0b"),
        ("background", "#ffffff"),
        ("foreground", "#0f172a"),
        ("muted", "#f1f5f9"),
        ("border", "#e2e8f0"),
        ("radius", "0.5rem"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// `true` when a theme variable name or value cannot break out of its
/// declaration.
pub fn is_safe_css_token(token: &str) -> bool {
    !token.is_empty() && !token.contains([';', '{', '}', '\n', '\r'])
}

fn custom_property(name: &str) -> String {
    if name.starts_with("--") {
        name.to_string()
    } else {
        format!("--{}", name)
    }
}

/// `:root { --name: value; }` for the given variables. Names may be given
/// with or without the leading `--`.
pub fn theme_block(variables: &BTreeMap<String, String>) -> String {
    let mut rule = CssRule::new(":root");
    for (name, value) in variables {
        rule = rule.with_property(custom_property(name), value.clone());
    }
    rule.to_css()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_zeroes_universal_box_model() {
        let universal = RESET_CSS.split("\n}").next().unwrap();
        assert!(universal.starts_with("*, *::before, *::after {"));
        assert!(universal.contains("box-sizing: border-box;"));
        assert!(universal.contains("margin: 0;"));
        assert!(universal.contains("padding: 0;"));
    }

    #[test]
    fn test_theme_block() {
        let mut vars = BTreeMap::new();
        vars.insert("primary".to_string(), "#000".to_string());
        vars.insert("--gap".to_string(), "8px".to_string());

        assert_eq!(
            theme_block(&vars),
            ":root {\n  --gap: 8px;\n  --primary: #000;\n}\n\n"
        );
    }

    #[test]
    fn test_default_theme_renders() {
        let css = theme_block(&default_theme());
        assert!(css.contains("--primary: #3b82f6;"));
    }

    #[test]
    fn test_unsafe_tokens() {
        assert!(is_safe_css_token("#fff"));
        assert!(is_safe_css_token("rgba(0, 0, 0, 0.5)"));
        assert!(!is_safe_css_token("red; } body { display: none"));
        assert!(!is_safe_css_token("a\nb"));
        assert!(!is_safe_css_token(""));
    }
}
