//! Project persistence format.
//!
//! A project is written as plain JSON. The `parent` back-reference is never
//! part of it, so the persisted form cannot contain a cycle; it is rebuilt
//! by one tree walk when loading.

use crate::error::{DocumentError, DocumentResult};
use crate::migrate::normalize_tree;
use crate::node::ComponentNode;
use crate::tree;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

fn default_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub components: Vec<ComponentNode>,
}

impl Project {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: default_name(),
            components: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_components(mut self, components: Vec<ComponentNode>) -> Self {
        self.components = components;
        self
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a project, normalize its tree and rebuild parent links.
    ///
    /// Fails on malformed JSON and on trees where an id occurs twice.
    pub fn from_json(source: &str) -> DocumentResult<Self> {
        let mut project: Project = serde_json::from_str(source)?;
        project.components = load_components(project.components)?;
        debug!(
            id = %project.id,
            nodes = tree::count(&project.components),
            "loaded project"
        );
        Ok(project)
    }
}

/// Parse a bare component array (the clipboard / export shape).
pub fn parse_components(source: &str) -> DocumentResult<Vec<ComponentNode>> {
    let components: Vec<ComponentNode> = serde_json::from_str(source)?;
    load_components(components)
}

fn load_components(mut components: Vec<ComponentNode>) -> DocumentResult<Vec<ComponentNode>> {
    if let Some(id) = tree::find_duplicate_id(&components) {
        return Err(DocumentError::DuplicateId(id.to_string()));
    }
    let fixes = normalize_tree(&mut components);
    if fixes > 0 {
        debug!(fixes, "normalized component tree");
    }
    tree::relink_parents(&mut components);
    Ok(components)
}
