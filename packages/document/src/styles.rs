//! Responsive style maps.
//!
//! A node's styles are a `base` map plus sparse per-breakpoint overlays.
//! Overlays only hold the properties that differ at that width; the
//! stylesheet cascade (mobile first, `min-width`) does the merging.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// CSS property name → value. Sorted so emission order is stable.
pub type StyleMap = BTreeMap<String, String>;

/// Build a [`StyleMap`] from `(property, value)` pairs.
pub fn style_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> StyleMap
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Named viewport-width threshold, ordered by ascending width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Breakpoint {
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl Breakpoint {
    /// All breakpoints in ascending width order.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }

    pub fn min_width_px(&self) -> u32 {
        match self {
            Breakpoint::Sm => 640,
            Breakpoint::Md => 768,
            Breakpoint::Lg => 1024,
            Breakpoint::Xl => 1280,
            Breakpoint::Xxl => 1536,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bp| bp.key() == key)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Base styles plus sparse breakpoint overlays.
///
/// Overlay keys are kept as strings so unrecognized keys survive a
/// load/save round trip; only [`Breakpoint`] keys are ever emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveStyles {
    #[serde(default)]
    pub base: StyleMap,

    #[serde(flatten)]
    pub overrides: BTreeMap<String, StyleMap>,
}

impl ResponsiveStyles {
    pub fn new(base: StyleMap) -> Self {
        Self {
            base,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, breakpoint: Breakpoint, styles: StyleMap) -> Self {
        self.overrides.insert(breakpoint.key().to_string(), styles);
        self
    }

    /// Overlay for a breakpoint, if one is present.
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&StyleMap> {
        self.overrides.get(breakpoint.key())
    }

    /// The map targeted by an edit: `base` for `None`, otherwise the overlay
    /// (created on demand).
    pub fn target_mut(&mut self, breakpoint: Option<Breakpoint>) -> &mut StyleMap {
        match breakpoint {
            None => &mut self.base,
            Some(bp) => self.overrides.entry(bp.key().to_string()).or_default(),
        }
    }

    /// Merge properties into `base` or an overlay. An empty value removes
    /// the property. Overlays left empty are dropped.
    pub fn merge(&mut self, breakpoint: Option<Breakpoint>, properties: StyleMap) {
        let target = self.target_mut(breakpoint);
        for (property, value) in properties {
            if value.trim().is_empty() {
                target.remove(&property);
            } else {
                target.insert(property, value);
            }
        }
        self.prune();
    }

    /// Drop overlays that no longer carry any property.
    pub fn prune(&mut self) {
        self.overrides.retain(|_, styles| !styles.is_empty());
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.overrides.values().all(|s| s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints_ascend() {
        let widths: Vec<u32> = Breakpoint::ALL.iter().map(|bp| bp.min_width_px()).collect();
        let mut sorted = widths.clone();
        sorted.sort();
        assert_eq!(widths, sorted);
        assert_eq!(Breakpoint::from_key("2xl"), Some(Breakpoint::Xxl));
        assert_eq!(Breakpoint::from_key("xxl"), None);
    }

    #[test]
    fn test_merge_removes_empty_values_and_prunes() {
        let mut styles = ResponsiveStyles::new(style_map([("color", "red")]));
        styles.merge(Some(Breakpoint::Md), style_map([("color", "blue")]));
        assert_eq!(styles.get(Breakpoint::Md).unwrap()["color"], "blue");

        styles.merge(Some(Breakpoint::Md), style_map([("color", "")]));
        assert!(styles.get(Breakpoint::Md).is_none());
        assert_eq!(styles.base["color"], "red");
    }

    #[test]
    fn test_deserialize_base_and_overlays() {
        let json = r#"{ "base": { "fontSize": "16px" }, "sm": { "fontSize": "14px" }, "tv": { "x": "y" } }"#;
        let styles: ResponsiveStyles = serde_json::from_str(json).unwrap();

        assert_eq!(styles.base["fontSize"], "16px");
        assert_eq!(styles.get(Breakpoint::Sm).unwrap()["fontSize"], "14px");
        // Unknown overlay keys are preserved
        assert!(styles.overrides.contains_key("tv"));
    }

    #[test]
    fn test_missing_base_defaults_to_empty() {
        let styles: ResponsiveStyles = serde_json::from_str(r#"{ "lg": {} }"#).unwrap();
        assert!(styles.base.is_empty());
    }
}
