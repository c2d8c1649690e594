use crate::compiler::CompileError;
use pagesmith_compiler_css::is_safe_css_token;
use pagesmith_document::CustomCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options for project generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfig {
    /// CSS and JS appended after everything generated from the tree
    #[serde(default)]
    pub global_custom_code: CustomCode,

    /// Emit a `:root` block of theme variables
    #[serde(default = "default_include_theme")]
    pub include_theme: bool,

    /// Theme variables; the default palette is used when empty
    #[serde(default)]
    pub theme_variables: BTreeMap<String, String>,

    /// Raw HTML injected at the end of `<head>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_html: Option<String>,

    /// Fraction of an element that must be visible to start a scroll
    /// animation
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
}

fn default_include_theme() -> bool {
    true
}

fn default_scroll_threshold() -> f64 {
    0.1
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            global_custom_code: CustomCode::default(),
            include_theme: default_include_theme(),
            theme_variables: BTreeMap::new(),
            head_html: None,
            scroll_threshold: default_scroll_threshold(),
        }
    }
}

impl GenerateConfig {
    pub fn from_json(source: &str) -> Result<Self, CompileError> {
        let config: GenerateConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that would produce broken output.
    pub fn validate(&self) -> Result<(), CompileError> {
        for (name, value) in &self.theme_variables {
            let bare = name.strip_prefix("--").unwrap_or(name);
            if !is_safe_css_token(bare) {
                return Err(CompileError::InvalidConfig(format!(
                    "theme variable name {:?} is not a valid custom property",
                    name
                )));
            }
            if !is_safe_css_token(value) {
                return Err(CompileError::InvalidConfig(format!(
                    "theme variable {:?} has an unsafe value {:?}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.scroll_threshold) {
            return Err(CompileError::InvalidConfig(format!(
                "scrollThreshold must be between 0 and 1, got {}",
                self.scroll_threshold
            )));
        }

        Ok(())
    }
}
