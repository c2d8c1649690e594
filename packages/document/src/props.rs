//! Semantic content attached to a node.
//!
//! Props are a key-value map whose per-type schema lives in the component
//! registry. Two entries have a fixed shape on every type and are typed
//! fields instead: `animations` and `customCode`.

use crate::animation::Animation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Per-node code hooks appended to the generated stylesheet and script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javascript: Option<String>,
}

impl CustomCode {
    pub fn is_empty(&self) -> bool {
        self.css.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.javascript.as_deref().map_or(true, |s| s.trim().is_empty())
    }
}

/// Keys stored in typed fields rather than in `values`.
const TYPED_KEYS: &[&str] = &["animations", "customCode"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Props {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<Animation>,

    #[serde(default, rename = "customCode", skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<CustomCode>,

    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Props::set`].
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// String value of a key. Non-string values are ignored.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn text_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.text(key).unwrap_or(default)
    }

    /// Scalar value rendered as text (strings, numbers and booleans).
    pub fn display(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.values.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// `true` for a boolean `true` or the string `"true"`.
    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }

    /// List of strings from an array, or from a comma-separated string.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.values.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.values.get(key).and_then(Value::as_object)
    }

    /// Set a key. `animations` and `customCode` are routed to their typed
    /// fields; a value of the wrong shape for them is ignored.
    pub fn set(&mut self, key: &str, value: Value) {
        match key {
            "animations" => {
                if value.is_null() {
                    self.animations.clear();
                } else if let Ok(animations) = serde_json::from_value(value) {
                    self.animations = animations;
                }
            }
            "customCode" => {
                if value.is_null() {
                    self.custom_code = None;
                } else if let Ok(code) = serde_json::from_value(value) {
                    self.custom_code = Some(code);
                }
            }
            _ => {
                self.values.insert(key.to_string(), value);
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Shallow merge: each provided key replaces the existing one, `null`
    /// deletes it (or clears the typed field).
    pub fn merge(&mut self, patch: BTreeMap<String, Value>) {
        for (key, value) in patch {
            if value.is_null() && !TYPED_KEYS.contains(&key.as_str()) {
                self.values.remove(&key);
            } else {
                self.set(&key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_accessors() {
        let props = Props::new()
            .with("content", "Hello")
            .with("level", 2)
            .with("required", "true")
            .with("options", json!(["One", "Two"]))
            .with("tags", "a, b,,c");

        assert_eq!(props.text("content"), Some("Hello"));
        assert_eq!(props.text("level"), None);
        assert_eq!(props.display("level").as_deref(), Some("2"));
        assert_eq!(props.number("level"), Some(2.0));
        assert!(props.flag("required"));
        assert!(!props.flag("missing"));
        assert_eq!(props.list("options"), vec!["One", "Two"]);
        assert_eq!(props.list("tags"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_replaces_and_deletes() {
        let mut props = Props::new().with("content", "Old").with("href", "/a");
        let mut patch = BTreeMap::new();
        patch.insert("content".to_string(), json!("New"));
        patch.insert("href".to_string(), Value::Null);
        props.merge(patch);

        assert_eq!(props.text("content"), Some("New"));
        assert!(!props.contains("href"));
    }

    #[test]
    fn test_set_routes_typed_keys() {
        let mut props = Props::new();
        props.set(
            "animations",
            json!([{ "id": "a1", "name": "fadeIn", "trigger": "onLoad" }]),
        );
        props.set("customCode", json!({ "css": "a { color: red; }" }));

        assert_eq!(props.animations.len(), 1);
        assert!(props.custom_code.is_some());
        assert!(!props.contains("animations"));
        assert!(!props.contains("customCode"));
    }

    #[test]
    fn test_merge_null_clears_typed_fields() {
        let mut props = Props::new();
        props.set(
            "animations",
            json!([{ "id": "a1", "name": "fadeIn", "trigger": "onLoad" }]),
        );
        props.set("customCode", json!({ "css": "a { color: red; }" }));

        let mut patch = BTreeMap::new();
        patch.insert("animations".to_string(), Value::Null);
        patch.insert("customCode".to_string(), Value::Null);
        props.merge(patch);

        assert!(props.animations.is_empty());
        assert!(props.custom_code.is_none());
        assert!(props.values.is_empty());
    }

    #[test]
    fn test_flattened_json_shape() {
        let json = r#"{ "content": "Hi", "animations": [], "customCode": { "javascript": "run()" } }"#;
        let props: Props = serde_json::from_str(json).unwrap();
        assert_eq!(props.text("content"), Some("Hi"));
        assert_eq!(
            props.custom_code.as_ref().and_then(|c| c.javascript.as_deref()),
            Some("run()")
        );

        let out = serde_json::to_value(&props).unwrap();
        assert_eq!(out["content"], "Hi");
        assert!(out.get("animations").is_none());
    }
}
