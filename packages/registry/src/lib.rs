//! # Pagesmith Registry
//!
//! The single source of truth for what each component type is: its default
//! props and styles, whether it accepts children, its style variants, its
//! prop schema and how it renders to HTML and CSS.
//!
//! ```
//! use pagesmith_document::{ComponentType, NodeId};
//! use pagesmith_registry::ComponentRegistry;
//!
//! let registry = ComponentRegistry::global();
//! let node = registry
//!     .instantiate(&ComponentType::Heading, NodeId::new("h1"))
//!     .unwrap();
//! assert!(registry.generate_html(&node).starts_with("<h2"));
//! ```

mod builtin;
mod definition;
mod diagnostic;
pub mod markup;
mod registry;
mod renderers;

pub use definition::{Category, ComponentDefinition, DefinitionSummary, PropKind, PropSpec, Variant};
pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use registry::ComponentRegistry;
pub use renderers::ComponentRenderer;
