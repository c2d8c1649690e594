use pagesmith_document::NodeId;
use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

/// A finding from validating a node against its definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    /// The check that produced this diagnostic
    pub rule: String,

    /// Human-readable message
    pub message: String,

    /// The node the issue was found on
    pub node_id: NodeId,

    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn error(rule: impl Into<String>, message: impl Into<String>, node_id: &NodeId) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            rule: rule.into(),
            message: message.into(),
            node_id: node_id.clone(),
            suggestion: None,
        }
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>, node_id: &NodeId) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            rule: rule.into(),
            message: message.into(),
            node_id: node_id.clone(),
            suggestion: None,
        }
    }

    pub fn info(rule: impl Into<String>, message: impl Into<String>, node_id: &NodeId) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            rule: rule.into(),
            message: message.into(),
            node_id: node_id.clone(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
