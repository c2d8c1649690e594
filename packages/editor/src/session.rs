//! # Edit Session
//!
//! One user's editing state for a project: the live component forest, the
//! current selection, the id generator and the undo history.
//!
//! All edits go through [`EditSession::apply`]. The convenience methods
//! (`insert`, `update`, `move_node`, ...) wrap it and turn rejected
//! mutations into silent no-ops, logged at `debug`.

use crate::mutations::{dedupe_animation_ids, Mutation, MutationContext, MutationError};
use crate::undo_stack::UndoStack;
use crate::EditorError;
use pagesmith_common::FileSystem;
use pagesmith_compiler_html::{generate_project_with, GenerateConfig, GeneratedProject};
use pagesmith_document::{
    get_project_seed, tree, Animation, Breakpoint, ComponentNode, ComponentType, IdGenerator,
    NodeId, NodePatch, Project, StyleMap, DEFAULT_PROJECT_NAME,
};
use pagesmith_registry::{ComponentRegistry, Diagnostic};
use std::path::Path;
use tracing::{debug, info};

pub struct EditSession {
    project_id: String,
    name: String,
    components: Vec<ComponentNode>,
    selection: Option<NodeId>,
    ids: IdGenerator,
    history: UndoStack,
    registry: &'static ComponentRegistry,
}

impl EditSession {
    /// Empty session for a new project, using the global registry
    pub fn new(project_id: impl Into<String>) -> Self {
        Self::with_registry(project_id, ComponentRegistry::global())
    }

    pub fn with_registry(project_id: impl Into<String>, registry: &'static ComponentRegistry) -> Self {
        let project_id = project_id.into();
        Self {
            ids: IdGenerator::new(&project_id),
            project_id,
            name: DEFAULT_PROJECT_NAME.to_string(),
            components: Vec::new(),
            selection: None,
            history: UndoStack::new(),
            registry,
        }
    }

    /// Resume editing a persisted project. New ids continue after the
    /// highest one already present.
    ///
    /// Children lists are reshaped to match the registry and repeated
    /// animation ids are reassigned, keeping the first in document order.
    pub fn from_project(project: Project) -> Self {
        let mut session = Self::new(project.id);
        session.name = project.name;

        let mut components = project.components;
        session.ids.resume_after(&tree::collect_ids(&components));
        let reshaped = session.registry.normalize_children(&mut components);
        let renamed = dedupe_animation_ids(&mut components, &mut session.ids);
        if reshaped + renamed > 0 {
            debug!(reshaped, renamed, "repaired loaded tree");
        }

        session.components = components;
        session
    }

    pub fn to_project(&self) -> Project {
        Project::new(self.project_id.clone())
            .with_name(self.name.clone())
            .with_components(self.components.clone())
    }

    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, EditorError> {
        let source = fs.read_to_string(path)?;
        let project = Project::from_json(&source)?;
        info!(path = %path.display(), project = %project.id, "opened project");
        Ok(Self::from_project(project))
    }

    pub fn save(&self, fs: &mut dyn FileSystem, path: &Path) -> Result<(), EditorError> {
        let json = self.to_project().to_json()?;
        fs.write(path, &json)?;
        info!(path = %path.display(), nodes = tree::count(&self.components), "saved project");
        Ok(())
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the project. Not an undoable edit.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn components(&self) -> &[ComponentNode] {
        &self.components
    }

    pub fn registry(&self) -> &'static ComponentRegistry {
        self.registry
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn find(&self, id: &NodeId) -> Option<&ComponentNode> {
        tree::find_by_id(&self.components, id)
    }

    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    pub fn selected(&self) -> Option<&ComponentNode> {
        self.selection.as_ref().and_then(|id| self.find(id))
    }

    /// Select a node, or clear the selection with `None`. Selecting an id
    /// that is not in the tree is refused.
    pub fn select(&mut self, id: Option<&NodeId>) -> bool {
        match id {
            None => {
                self.selection = None;
                true
            }
            Some(id) if tree::contains(&self.components, id) => {
                self.selection = Some(id.clone());
                true
            }
            Some(_) => false,
        }
    }

    /// Apply a mutation and record the prior forest in history.
    ///
    /// A rejected mutation leaves the tree untouched; one that changes
    /// nothing is not recorded.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Option<ComponentNode>, MutationError> {
        let before = self.components.clone();
        let mut cx = MutationContext {
            registry: self.registry,
            ids: &mut self.ids,
        };

        match mutation.apply(&mut self.components, &mut cx) {
            Ok(outcome) => {
                if self.components == before {
                    debug!(mutation = %mutation.description(), "mutation changed nothing");
                } else {
                    self.history
                        .record_snapshot(before, Some(mutation.description()));
                    debug!(mutation = %mutation.description(), "applied mutation");
                }
                Ok(outcome)
            }
            Err(err) => {
                debug!(mutation = %mutation.description(), error = %err, "mutation rejected");
                Err(err)
            }
        }
    }

    /// Insert a new component from registry defaults and select it.
    ///
    /// `index` is clamped to the sibling count; `None` appends.
    pub fn insert(
        &mut self,
        component_type: ComponentType,
        parent: Option<&NodeId>,
        index: Option<usize>,
    ) -> Option<ComponentNode> {
        let node = self
            .apply(Mutation::InsertComponent {
                component_type,
                parent_id: parent.cloned(),
                index,
            })
            .ok()
            .flatten()?;
        self.selection = Some(node.id.clone());
        Some(node)
    }

    pub fn update(&mut self, id: &NodeId, patch: NodePatch) -> bool {
        self.apply(Mutation::UpdateComponent {
            node_id: id.clone(),
            patch,
        })
        .is_ok()
    }

    /// Merge style properties into `base` (`None`) or a breakpoint overlay.
    /// Empty values remove the property.
    pub fn update_styles(
        &mut self,
        id: &NodeId,
        breakpoint: Option<Breakpoint>,
        styles: StyleMap,
    ) -> bool {
        self.apply(Mutation::UpdateStyles {
            node_id: id.clone(),
            breakpoint,
            styles,
        })
        .is_ok()
    }

    /// Replace a node's styles with one of its type's variant presets.
    pub fn apply_variant(&mut self, id: &NodeId, variant: &str) -> bool {
        self.apply(Mutation::ApplyVariant {
            node_id: id.clone(),
            variant: variant.to_string(),
        })
        .is_ok()
    }

    pub fn attach_animation(&mut self, id: &NodeId, animation: Animation) -> bool {
        self.apply(Mutation::AttachAnimation {
            node_id: id.clone(),
            animation,
        })
        .is_ok()
    }

    pub fn detach_animation(&mut self, id: &NodeId, animation_id: &str) -> bool {
        self.apply(Mutation::DetachAnimation {
            node_id: id.clone(),
            animation_id: animation_id.to_string(),
        })
        .is_ok()
    }

    /// Delete a node and its subtree. The selection clears when it was
    /// inside the removed subtree.
    pub fn remove(&mut self, id: &NodeId) -> Option<ComponentNode> {
        let selection_removed = self
            .selection
            .as_ref()
            .is_some_and(|sel| sel == id || tree::is_descendant(&self.components, id, sel));

        let removed = self
            .apply(Mutation::RemoveComponent {
                node_id: id.clone(),
            })
            .ok()
            .flatten()?;
        if selection_removed {
            self.selection = None;
        }
        Some(removed)
    }

    /// Move a node under `new_parent` (or to the root) at `index`.
    ///
    /// Fails without changing anything when the destination is missing,
    /// a leaf, or inside the moved subtree.
    pub fn move_node(&mut self, id: &NodeId, new_parent: Option<&NodeId>, index: usize) -> bool {
        self.apply(Mutation::MoveComponent {
            node_id: id.clone(),
            new_parent_id: new_parent.cloned(),
            index,
        })
        .is_ok()
    }

    /// Copy a node with fresh ids right after the original and select it.
    pub fn duplicate(&mut self, id: &NodeId) -> Option<ComponentNode> {
        let copy = self
            .apply(Mutation::DuplicateComponent {
                node_id: id.clone(),
            })
            .ok()
            .flatten()?;
        self.selection = Some(copy.id.clone());
        Some(copy)
    }

    /// Start over: empty tree, no selection, a new project id and name.
    pub fn clear(&mut self) {
        let _ = self.apply(Mutation::ClearAll);

        let project_id = format!(
            "project-{}",
            get_project_seed(&format!("{}#{}", self.project_id, self.ids.count()))
        );
        info!(previous = %self.project_id, project = %project_id, "cleared project");

        self.ids = IdGenerator::new(&project_id);
        self.project_id = project_id;
        self.name = DEFAULT_PROJECT_NAME.to_string();
        self.selection = None;
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.components);
        if undone {
            self.selection = None;
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.components);
        if redone {
            self.selection = None;
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Group the following edits into one undo step. Batches nest.
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        let outermost = !self.history.in_batch();
        self.history.begin_batch();
        if outermost {
            self.history.set_batch_description(description);
        }
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Check the whole tree against the registry's definitions
    pub fn validate(&self) -> Vec<Diagnostic> {
        self.registry.validate_tree(&self.components)
    }

    /// Generate markup, styles and script for the current tree. The title
    /// defaults to the project name.
    pub fn export(
        &self,
        title: Option<&str>,
        config: &GenerateConfig,
    ) -> Result<GeneratedProject, EditorError> {
        let title = title.unwrap_or(self.name.as_str());
        Ok(generate_project_with(
            self.registry,
            &self.components,
            title,
            config,
        )?)
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("project_id", &self.project_id)
            .field("name", &self.name)
            .field("nodes", &tree::count(&self.components))
            .field("selection", &self.selection)
            .field("undo_levels", &self.history.undo_levels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_common::MemoryFileSystem;

    #[test]
    fn test_session_creation() {
        let session = EditSession::new("landing");

        assert_eq!(session.project_id(), "landing");
        assert_eq!(session.name(), "Untitled Project");
        assert!(session.components().is_empty());
        assert!(session.selection().is_none());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_insert_selects_and_records() {
        let mut session = EditSession::new("landing");
        let node = session.insert(ComponentType::Heading, None, None).unwrap();

        assert_eq!(session.selection(), Some(&node.id));
        assert_eq!(session.selected().unwrap().display_name, "Heading");
        assert_eq!(session.history().undo_levels(), 1);
        assert_eq!(session.history().undo_description(), Some("Insert heading"));
    }

    #[test]
    fn test_rejected_calls_do_not_record() {
        let mut session = EditSession::new("landing");
        let text = session.insert(ComponentType::Text, None, None).unwrap();

        assert!(session.insert(ComponentType::Text, Some(&text.id), None).is_none());
        assert!(!session.update(&NodeId::new("missing"), NodePatch::new().locked(true)));
        assert!(!session.apply_variant(&text.id, "does-not-exist"));
        assert!(session.remove(&NodeId::new("missing")).is_none());

        assert_eq!(session.history().undo_levels(), 1);
    }

    #[test]
    fn test_select_refuses_missing_ids() {
        let mut session = EditSession::new("landing");
        assert!(!session.select(Some(&NodeId::new("ghost"))));
        assert!(session.select(None));
    }

    #[test]
    fn test_clear_reseeds_and_renames() {
        let mut session = EditSession::new("landing");
        session.rename("Landing Page");
        let before = session.insert(ComponentType::Section, None, None).unwrap();

        session.clear();

        assert!(session.components().is_empty());
        assert!(session.selection().is_none());
        assert_eq!(session.name(), "Untitled Project");
        assert_ne!(session.project_id(), "landing");

        let after = session.insert(ComponentType::Section, None, None).unwrap();
        assert_ne!(after.id, before.id);

        // Clearing is itself undoable
        session.undo();
        session.undo();
        assert_eq!(session.components().len(), 1);
        assert_eq!(session.components()[0].id, before.id);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut fs = MemoryFileSystem::new();
        let path = Path::new("site/project.json");

        let mut session = EditSession::new("landing");
        let section = session.insert(ComponentType::Section, None, None).unwrap();
        session.insert(ComponentType::Button, Some(&section.id), None).unwrap();
        session.save(&mut fs, path).unwrap();

        let mut reopened = EditSession::load(&fs, path).unwrap();
        assert_eq!(reopened.components(), session.components());
        assert!(!reopened.can_undo());

        // Fresh ids never collide with loaded ones
        let extra = reopened.insert(ComponentType::Text, None, None).unwrap();
        assert_eq!(tree::count(reopened.components()), 3);
        assert!(session.find(&extra.id).is_none());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let fs = MemoryFileSystem::new();
        let err = EditSession::load(&fs, Path::new("nope.json")).unwrap_err();
        assert!(matches!(err, EditorError::Io(_)));
    }

    #[test]
    fn test_export_uses_project_name_as_title() {
        let mut session = EditSession::new("landing");
        session.rename("Acme & Co");
        session.insert(ComponentType::Heading, None, None).unwrap();

        let output = session.export(None, &GenerateConfig::default()).unwrap();
        assert!(output.full_page.contains("<title>Acme &amp; Co</title>"));
        assert!(output.html.contains("Heading"));
    }
}
