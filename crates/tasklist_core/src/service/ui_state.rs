//! Ephemeral presentation state for a task list front end.
//!
//! # Responsibility
//! - Track the active filter, the task being edited and the open dialog.
//! - Drive store mutations only through explicit `TaskStore` calls.
//!
//! # Invariants
//! - At most one dialog is open at a time.
//! - The editing marker survives an empty edit submission and is cleared
//!   after every other one.
//! - A delete only happens after `confirm_delete`.

use crate::model::filter::FilterMode;
use crate::model::task::{Task, TaskId};
use crate::model::validation::ValidationError;
use crate::repo::kv_store::KeyValueStore;
use crate::service::task_store::TaskStore;

/// Shown when a warning is opened without a message.
pub const GENERIC_WARNING: &str = "Something went wrong.";

/// Dialog currently shown over the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Waiting for the user to confirm deletion of a task.
    ConfirmDelete(TaskId),
    /// Informational warning, e.g. after rejected input.
    Warning(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    filter: FilterMode,
    editing: Option<TaskId>,
    dialog: Option<Dialog>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    /// Tasks visible under the active filter.
    pub fn visible<'a, S: KeyValueStore>(&self, store: &'a TaskStore<S>) -> Vec<&'a Task> {
        store.filtered(self.filter)
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Submits new task text.
    ///
    /// On rejection a warning dialog opens and the caller should keep its
    /// input as typed.
    pub fn submit_add<S: KeyValueStore>(
        &mut self,
        store: &mut TaskStore<S>,
        text: &str,
    ) -> Result<TaskId, ValidationError> {
        store.add(text).map_err(|err| {
            self.show_warning(err.to_string());
            err
        })
    }

    /// Marks `id` as the task being edited.
    pub fn start_edit(&mut self, id: TaskId) {
        self.editing = Some(id);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submits replacement text for the task being edited.
    ///
    /// Returns `Ok(false)` when no edit is in progress or the task no longer
    /// exists. On rejection a warning dialog opens and the stored text is
    /// unchanged. Empty text keeps the task in edit mode; any other outcome
    /// ends it.
    pub fn submit_edit<S: KeyValueStore>(
        &mut self,
        store: &mut TaskStore<S>,
        text: &str,
    ) -> Result<bool, ValidationError> {
        let Some(id) = self.editing.take() else {
            return Ok(false);
        };
        store.edit(id, text).map_err(|err| {
            if err == ValidationError::Empty {
                self.editing = Some(id);
            }
            self.show_warning(err.to_string());
            err
        })
    }

    /// Opens the delete confirmation for `id`.
    pub fn request_delete(&mut self, id: TaskId) {
        self.dialog = Some(Dialog::ConfirmDelete(id));
    }

    /// Deletes the task awaiting confirmation and closes the dialog.
    ///
    /// Returns whether a task was removed.
    pub fn confirm_delete<S: KeyValueStore>(&mut self, store: &mut TaskStore<S>) -> bool {
        match self.dialog.take() {
            Some(Dialog::ConfirmDelete(id)) => {
                if self.editing == Some(id) {
                    self.editing = None;
                }
                store.remove(id)
            }
            other => {
                self.dialog = other;
                false
            }
        }
    }

    /// Closes the delete confirmation without deleting.
    pub fn cancel_delete(&mut self) {
        if matches!(self.dialog, Some(Dialog::ConfirmDelete(_))) {
            self.dialog = None;
        }
    }

    pub fn pending_delete(&self) -> Option<TaskId> {
        match self.dialog {
            Some(Dialog::ConfirmDelete(id)) => Some(id),
            _ => None,
        }
    }

    /// Opens a warning, replacing any open dialog.
    pub fn show_warning(&mut self, message: impl Into<String>) {
        self.dialog = Some(Dialog::Warning(message.into()));
    }

    pub fn close_warning(&mut self) {
        if matches!(self.dialog, Some(Dialog::Warning(_))) {
            self.dialog = None;
        }
    }

    /// Text of the open warning, with the generic fallback for empty messages.
    pub fn warning_message(&self) -> Option<&str> {
        match &self.dialog {
            Some(Dialog::Warning(message)) if message.is_empty() => Some(GENERIC_WARNING),
            Some(Dialog::Warning(message)) => Some(message.as_str()),
            _ => None,
        }
    }
}
