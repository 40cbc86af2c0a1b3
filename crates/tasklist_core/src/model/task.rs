//! Task domain model.
//!
//! # Responsibility
//! - Define the single record kept by the task list.
//! - Allocate identifiers that stay unique for the store lifetime.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is stored trimmed and never empty.
//! - `completed` starts as `false`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier for a task.
///
/// Serialized as a plain JSON number so persisted blobs keep the
/// `{"id": number, ...}` shape.
pub type TaskId = i64;

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Lookup key for toggle/edit/remove.
    pub id: TaskId,
    /// Trimmed, non-empty task text.
    pub text: String,
    /// Completion flag toggled by the user. Missing in a stored record means
    /// pending.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates a pending task with a caller-provided id.
    ///
    /// Callers are expected to pass text that already went through
    /// `validate`; this constructor does not trim or check duplicates.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Returns the next task id for a sequence.
///
/// Ids follow the wall clock in epoch milliseconds, but are always strictly
/// greater than every id already present so two tasks created within the same
/// millisecond (or after a clock step backwards) still get distinct ids.
///
/// When the largest existing id is `TaskId::MAX` there is no greater id; the
/// highest unused id is returned instead.
pub fn next_task_id(existing: &[Task]) -> TaskId {
    let now = now_epoch_ms();
    let Some(max) = existing.iter().map(|task| task.id).max() else {
        return now;
    };
    match max.checked_add(1) {
        Some(floor) => now.max(floor),
        None => highest_unused_id(existing),
    }
}

fn highest_unused_id(existing: &[Task]) -> TaskId {
    let used: HashSet<TaskId> = existing.iter().map(|task| task.id).collect();
    // At most `used.len()` candidates are taken, so the scan ends quickly.
    (TaskId::MIN..=TaskId::MAX)
        .rev()
        .find(|id| !used.contains(id))
        .unwrap_or(TaskId::MIN)
}

fn now_epoch_ms() -> TaskId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| TaskId::try_from(elapsed.as_millis()).unwrap_or(TaskId::MAX))
        .unwrap_or(0)
}
