//! Workspace registry (the tab row) and the path table.
//!
//! Workspaces are addressed by position for display and by `WorkspaceId` for everything that must
//! survive tabs closing: pending dialogs, in-flight effects and the path table.

use crate::models::{CharFormat, DocumentSurface};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

pub const NEW_WORKSPACE_LABEL: &str = "New Workspace";
pub const FILE_LABEL_PREFIX: &str = "File: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkspaceId(u64);

impl WorkspaceId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone)]
pub struct Workspace {
    id: WorkspaceId,
    pub label: String,
    pub surface: DocumentSurface,
}

impl Workspace {
    pub fn id(&self) -> WorkspaceId {
        self.id
    }
}

/// `"File: notes.txt"` for `/some/dir/notes.txt`.
pub fn file_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    format!("{FILE_LABEL_PREFIX}{name}")
}

#[derive(Debug, Clone)]
pub struct WorkspaceRegistry {
    workspaces: Vec<Workspace>,
    active: usize,
    next_id: u64,
    default_format: CharFormat,
}

impl WorkspaceRegistry {
    pub fn new(default_format: CharFormat) -> Self {
        Self {
            workspaces: Vec::new(),
            active: 0,
            next_id: 1,
            default_format,
        }
    }

    pub fn default_format(&self) -> &CharFormat {
        &self.default_format
    }

    /// Appends an empty workspace labeled "New Workspace" and makes it active.
    pub fn add_workspace(&mut self) -> WorkspaceId {
        let id = WorkspaceId::new(self.next_id);
        self.next_id += 1;
        self.workspaces.push(Workspace {
            id,
            label: NEW_WORKSPACE_LABEL.to_string(),
            surface: DocumentSurface::new(self.default_format.clone()),
        });
        self.active = self.workspaces.len() - 1;
        id
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workspace> {
        self.workspaces.iter()
    }

    pub fn active_index(&self) -> Option<usize> {
        (!self.workspaces.is_empty()).then_some(self.active)
    }

    pub fn active(&self) -> Option<&Workspace> {
        self.workspaces.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Workspace> {
        self.workspaces.get_mut(self.active)
    }

    pub fn active_id(&self) -> Option<WorkspaceId> {
        self.active().map(Workspace::id)
    }

    pub fn index_of(&self, id: WorkspaceId) -> Option<usize> {
        self.workspaces.iter().position(|w| w.id == id)
    }

    pub fn get(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WorkspaceId) -> Option<&mut Workspace> {
        self.workspaces.iter_mut().find(|w| w.id == id)
    }

    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.workspaces.len() || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    /// Removes the workspace at `index`. The active position follows the workspace that was active
    /// when possible; when the active one is closed, its right neighbour (or the new last) wins.
    pub fn close(&mut self, index: usize) -> Option<Workspace> {
        if index >= self.workspaces.len() {
            return None;
        }
        let removed = self.workspaces.remove(index);
        if index < self.active {
            self.active -= 1;
        }
        if self.active >= self.workspaces.len() {
            self.active = self.workspaces.len().saturating_sub(1);
        }
        Some(removed)
    }
}

/// Last-used path per workspace. An entry means plain "Save" writes without prompting.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    entries: FxHashMap<WorkspaceId, PathBuf>,
}

impl PathTable {
    pub fn get(&self, id: WorkspaceId) -> Option<&Path> {
        self.entries.get(&id).map(PathBuf::as_path)
    }

    pub fn set(&mut self, id: WorkspaceId, path: PathBuf) {
        self.entries.insert(id, path);
    }

    pub fn remove(&mut self, id: WorkspaceId) -> Option<PathBuf> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/workspace.rs"]
mod tests;
