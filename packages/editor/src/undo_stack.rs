//! # Undo/Redo Stack
//!
//! Snapshot history for an edit session.
//!
//! ## Design
//!
//! - Before each mutation the session records a deep copy of the forest
//! - Undo swaps the live forest with the newest snapshot and keeps the live
//!   one for redo; redo is the mirror image
//! - Recording clears the redo side
//! - The past is bounded; the oldest snapshot is evicted first
//! - Batches (which may nest) record a single snapshot for the whole group
//!
//! ## Example
//!
//! ```rust
//! use pagesmith_document::{ComponentNode, ComponentType, NodeId};
//! use pagesmith_editor::UndoStack;
//!
//! let mut stack = UndoStack::new();
//! let mut live = Vec::new();
//!
//! stack.record(&live, "Insert text");
//! live.push(ComponentNode::new(NodeId::new("t1"), ComponentType::Text));
//!
//! assert!(stack.undo(&mut live));
//! assert!(live.is_empty());
//!
//! assert!(stack.redo(&mut live));
//! assert_eq!(live.len(), 1);
//! ```

use pagesmith_document::ComponentNode;
use std::collections::VecDeque;

/// Default number of undo levels kept
pub const DEFAULT_MAX_LEVELS: usize = 50;

/// The forest as it was before a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub components: Vec<ComponentNode>,

    /// Description of the mutation that followed this snapshot
    pub description: Option<String>,
}

/// Undo/redo stack for component trees
#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots to return to (most recent last)
    past: VecDeque<Snapshot>,

    /// Snapshots undone away from (most recent last)
    future: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Open `begin_batch` calls
    batch_depth: usize,

    /// Whether the open batch already holds its snapshot
    batch_recorded: bool,

    batch_description: Option<String>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (50)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            max_levels,
            batch_depth: 0,
            batch_recorded: false,
            batch_description: None,
        }
    }

    /// Record a deep copy of `current` ahead of a mutation
    pub fn record(&mut self, current: &[ComponentNode], description: impl Into<String>) {
        self.record_snapshot(current.to_vec(), Some(description.into()));
    }

    /// Record a snapshot the caller already owns
    ///
    /// Inside a batch only the first snapshot is kept.
    pub fn record_snapshot(&mut self, components: Vec<ComponentNode>, description: Option<String>) {
        if self.batch_depth > 0 {
            if self.batch_recorded {
                return;
            }
            self.batch_recorded = true;
        }

        self.past.push_back(Snapshot {
            components,
            description,
        });
        self.evict();

        // New action invalidates future
        self.future.clear();
    }

    /// Start a group of mutations that undo/redo as one step
    pub fn begin_batch(&mut self) {
        if self.batch_depth == 0 {
            self.batch_recorded = false;
            self.batch_description = None;
        }
        self.batch_depth += 1;
    }

    /// Close the innermost batch
    pub fn end_batch(&mut self) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;

        if self.batch_depth == 0 {
            if let Some(description) = self.batch_description.take() {
                if self.batch_recorded {
                    if let Some(snapshot) = self.past.back_mut() {
                        snapshot.description = Some(description);
                    }
                }
            }
            self.batch_recorded = false;
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if self.batch_depth > 0 {
            self.batch_description = Some(description.into());
        }
    }

    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    fn evict(&mut self) {
        if self.max_levels > 0 {
            while self.past.len() > self.max_levels {
                self.past.pop_front();
            }
        }
    }

    /// Return `live` to the most recent snapshot
    pub fn undo(&mut self, live: &mut Vec<ComponentNode>) -> bool {
        let Some(snapshot) = self.past.pop_back() else {
            return false; // Nothing to undo
        };

        let current = std::mem::replace(live, snapshot.components);
        self.future.push(Snapshot {
            components: current,
            description: snapshot.description,
        });
        true
    }

    /// Reapply the most recently undone step
    pub fn redo(&mut self, live: &mut Vec<ComponentNode>) -> bool {
        let Some(snapshot) = self.future.pop() else {
            return false; // Nothing to redo
        };

        let current = std::mem::replace(live, snapshot.components);
        self.past.push_back(Snapshot {
            components: current,
            description: snapshot.description,
        });
        self.evict();
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.batch_depth = 0;
        self.batch_recorded = false;
        self.batch_description = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.past.back().and_then(|s| s.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.future.last().and_then(|s| s.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_document::{ComponentType, NodeId};

    fn text(id: &str) -> ComponentNode {
        ComponentNode::new(NodeId::new(id), ComponentType::Text)
    }

    /// Record, then push a node, like a session insert does.
    fn push(stack: &mut UndoStack, live: &mut Vec<ComponentNode>, id: &str) {
        stack.record(live, format!("Insert {}", id));
        live.push(text(id));
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert_eq!(stack.max_levels(), 50);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_undo_and_redo_swap_snapshots() {
        let mut stack = UndoStack::new();
        let mut live = Vec::new();
        push(&mut stack, &mut live, "a");
        push(&mut stack, &mut live, "b");
        let after = live.clone();

        assert!(stack.undo(&mut live));
        assert_eq!(live.len(), 1);
        assert_eq!(stack.redo_description(), Some("Insert b"));

        assert!(stack.redo(&mut live));
        assert_eq!(live, after);
        assert_eq!(stack.undo_description(), Some("Insert b"));
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut stack = UndoStack::new();
        let mut live = vec![text("a")];
        assert!(!stack.undo(&mut live));
        assert!(!stack.redo(&mut live));
        assert_eq!(live.len(), 1);
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut stack = UndoStack::new();
        let mut live = Vec::new();
        push(&mut stack, &mut live, "a");
        stack.undo(&mut live);
        assert_eq!(stack.redo_levels(), 1);

        push(&mut stack, &mut live, "b");
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_evicts_oldest() {
        let mut stack = UndoStack::with_max_levels(2);
        let mut live = Vec::new();
        for id in ["a", "b", "c"] {
            push(&mut stack, &mut live, id);
        }

        assert_eq!(stack.undo_levels(), 2);
        stack.undo(&mut live);
        stack.undo(&mut live);
        // The empty forest was evicted, so "a" stays
        assert_eq!(live.len(), 1);
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_nested_batches_record_once() {
        let mut stack = UndoStack::new();
        let mut live = Vec::new();

        stack.begin_batch();
        stack.set_batch_description("Build hero");
        push(&mut stack, &mut live, "a");
        stack.begin_batch();
        push(&mut stack, &mut live, "b");
        stack.end_batch();
        push(&mut stack, &mut live, "c");
        stack.end_batch();

        assert!(!stack.in_batch());
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Build hero"));

        stack.undo(&mut live);
        assert!(live.is_empty());
    }

    #[test]
    fn test_empty_batch_records_nothing() {
        let mut stack = UndoStack::new();
        stack.begin_batch();
        stack.set_batch_description("Nothing");
        stack.end_batch();
        stack.end_batch();
        assert_eq!(stack.undo_levels(), 0);
    }
}
