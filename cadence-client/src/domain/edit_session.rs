use cadence_core::GroupId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Mode of the group list screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListMode {
    /// Read-only list (default)
    Viewing,
    /// Selection and drag-reorder enabled
    Editing,
}

impl Default for ListMode {
    fn default() -> Self {
        ListMode::Viewing
    }
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListMode::Viewing => write!(f, "Viewing"),
            ListMode::Editing => write!(f, "Editing"),
        }
    }
}

/// Errors that can occur during list editing
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EditError {
    #[error("List is not in editing mode")]
    NotEditing,
}

/// Per-session editing state for the group list.
///
/// Entering editing mode clears any stale selection; leaving it always
/// clears the selection, no matter how the exit was reached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSession {
    mode: ListMode,
    selection: HashSet<GroupId>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ListMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == ListMode::Editing
    }

    /// Enter editing mode, dropping any selection left over from a
    /// previous session.
    pub fn begin_editing(&mut self) {
        self.selection.clear();
        self.mode = ListMode::Editing;
    }

    /// Return to viewing mode. The selection is always cleared.
    pub fn finish_editing(&mut self) {
        self.selection.clear();
        self.mode = ListMode::Viewing;
    }

    /// Flip a group's membership in the selection set. Toggling twice is
    /// a no-op on the visible selection.
    pub fn toggle_select(&mut self, id: GroupId) -> Result<bool, EditError> {
        if !self.is_editing() {
            return Err(EditError::NotEditing);
        }

        if self.selection.remove(&id) {
            Ok(false)
        } else {
            self.selection.insert(id);
            Ok(true)
        }
    }

    pub fn is_selected(&self, id: GroupId) -> bool {
        self.selection.contains(&id)
    }

    pub fn selection(&self) -> &HashSet<GroupId> {
        &self.selection
    }

    /// Selection as a sorted list, for callers that need a deterministic
    /// iteration order.
    pub fn selection_sorted(&self) -> Vec<GroupId> {
        let mut ids: Vec<GroupId> = self.selection.iter().copied().collect();
        ids.sort();
        ids
    }
}
