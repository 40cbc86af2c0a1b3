//! Task store: the only mutator of the task sequence.
//!
//! # Responsibility
//! - Own the ordered task sequence for one session.
//! - Route add/edit text through validation before committing it.
//! - Persist the full sequence after every successful mutation.
//!
//! # Invariants
//! - Insertion order is preserved; no operation re-sorts tasks.
//! - Ids are unique; texts are unique ignoring case; texts are never empty.
//! - No-ops and rejected input do not write to the backend.

use crate::model::filter::{filter_tasks, FilterMode};
use crate::model::task::{next_task_id, Task, TaskId};
use crate::model::validation::{validate, ValidationError};
use crate::repo::kv_store::KeyValueStore;
use crate::repo::persistence::PersistenceBridge;
use log::{debug, info};

/// Per-mode task counts, used for list headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskCounts {
    pub fn for_mode(&self, mode: FilterMode) -> usize {
        match mode {
            FilterMode::All => self.total,
            FilterMode::Completed => self.completed,
            FilterMode::Pending => self.pending,
        }
    }
}

/// In-memory task sequence with an injected persistence backend.
pub struct TaskStore<S: KeyValueStore> {
    tasks: Vec<Task>,
    persistence: PersistenceBridge<S>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Creates a store seeded from whatever the backend currently holds.
    pub fn open(persistence: PersistenceBridge<S>) -> Self {
        let tasks = persistence.load();
        Self { tasks, persistence }
    }

    /// Adds a pending task.
    ///
    /// # Errors
    /// Returns the validation failure unchanged; the sequence is untouched.
    pub fn add(&mut self, text: &str) -> Result<TaskId, ValidationError> {
        let text = validate(text, &self.tasks, None).map_err(|err| {
            debug!("event=task_add module=store status=rejected reason={}", err.code());
            err
        })?;

        let id = next_task_id(&self.tasks);
        self.tasks.push(Task::new(id, text));
        info!("event=task_add module=store status=ok id={id} count={}", self.tasks.len());
        self.persist();
        Ok(id)
    }

    /// Flips completion for `id`.
    ///
    /// Returns `false` (and changes nothing) when the id is unknown.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=store status=noop id={id}");
            return false;
        };
        task.toggle();
        info!(
            "event=task_toggle module=store status=ok id={id} completed={}",
            task.completed
        );
        self.persist();
        true
    }

    /// Removes the task with `id`.
    ///
    /// Returns `false` (and changes nothing) when the id is unknown.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_remove module=store status=noop id={id}");
            return false;
        }
        info!("event=task_remove module=store status=ok id={id} count={}", self.tasks.len());
        self.persist();
        true
    }

    /// Replaces the text of `id`, keeping its id and completion flag.
    ///
    /// The duplicate check skips the task being edited, so re-casing its own
    /// text is accepted. Returns `Ok(false)` when the text is valid but no
    /// task has `id`.
    ///
    /// # Errors
    /// Returns the validation failure; the stored text stays as it was.
    pub fn edit(&mut self, id: TaskId, text: &str) -> Result<bool, ValidationError> {
        let text = validate(text, &self.tasks, Some(id)).map_err(|err| {
            debug!(
                "event=task_edit module=store status=rejected id={id} reason={}",
                err.code()
            );
            err
        })?;

        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_edit module=store status=noop id={id}");
            return Ok(false);
        };
        task.text = text;
        info!("event=task_edit module=store status=ok id={id}");
        self.persist();
        Ok(true)
    }

    /// Full sequence in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Visible subsequence for `mode`.
    pub fn filtered(&self, mode: FilterMode) -> Vec<&Task> {
        filter_tasks(&self.tasks, mode)
    }

    pub fn counts(&self) -> TaskCounts {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskCounts {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn persistence(&self) -> &PersistenceBridge<S> {
        &self.persistence
    }

    fn persist(&self) {
        // Failures are already logged by the bridge.
        let _ = self.persistence.save(&self.tasks);
    }
}
