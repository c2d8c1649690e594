//! # Pagesmith Editor
//!
//! Editing model for Pagesmith projects: an [`EditSession`] owns the live
//! component forest and applies semantic [`Mutation`]s to it, recording a
//! snapshot in its [`UndoStack`] before each one.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ EditSession                                 │
//! │  - insert / update / move / duplicate / ... │
//! │  - selection                                │
//! └─────────────────────────────────────────────┘
//!          ↓ Mutation            ↓ snapshot
//! ┌──────────────────────┐ ┌────────────────────┐
//! │ mutations: validated │ │ UndoStack          │
//! │ edits on the forest  │ │ past / future      │
//! └──────────────────────┘ └────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────────┐
//! │ export: pagesmith-compiler-html             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pagesmith_document::ComponentType;
//! use pagesmith_editor::EditSession;
//!
//! let mut session = EditSession::new("landing");
//! let section = session.insert(ComponentType::Section, None, None).unwrap();
//! session.insert(ComponentType::Heading, Some(&section.id), None);
//!
//! assert!(session.undo());
//! assert_eq!(session.components()[0].children().len(), 0);
//! ```

pub mod errors;
pub mod mutations;
pub mod session;
pub mod undo_stack;

pub use errors::EditorError;
pub use mutations::{Mutation, MutationContext, MutationError};
pub use session::EditSession;
pub use undo_stack::{Snapshot, UndoStack, DEFAULT_MAX_LEVELS};
