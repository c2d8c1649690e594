//! # Pagesmith Document
//!
//! The in-memory component tree of a page and everything needed to keep it
//! well-formed: typed nodes, responsive style maps, animations, id
//! generation, tree primitives and the JSON persistence format.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: ComponentNode forest              │
//! │  - node / props / styles / animation types  │
//! │  - tree primitives (find, insert, extract)  │
//! │  - Project JSON + load normalization        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession (mutations + history)   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ registry + compilers: HTML / CSS / JS       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Ownership is strictly top-down: a node owns its `children`, and the
//! `parent` field is only a lookup aid that is never serialized.

pub mod animation;
pub mod error;
pub mod id_generator;
pub mod migrate;
pub mod node;
pub mod props;
pub mod safe_clone;
pub mod serializer;
pub mod styles;
pub mod tree;

pub use animation::{Animation, AnimationOptions, AnimationTrigger, Keyframe};
pub use error::{DocumentError, DocumentResult};
pub use id_generator::{get_project_seed, IdGenerator};
pub use migrate::{migrate_props, normalize_node, normalize_tree};
pub use node::{ComponentNode, ComponentType, NodeId, NodePatch};
pub use props::{CustomCode, Props};
pub use safe_clone::{SharedValue, CIRCULAR_SENTINEL};
pub use serializer::{parse_components, Project, DEFAULT_PROJECT_NAME};
pub use styles::{style_map, Breakpoint, ResponsiveStyles, StyleMap};
pub use tree::Location;
