//! Core domain logic for the task list.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::filter::{filter_tasks, FilterMode, ParseFilterModeError};
pub use model::task::{next_task_id, Task, TaskId};
pub use model::validation::{trim_text, validate, ValidationError};
pub use repo::kv_store::{KeyValueStore, MemoryStore, SqliteKvStore, StorageError, StorageResult};
pub use repo::persistence::{PersistenceBridge, STORAGE_KEY};
pub use service::task_store::{TaskCounts, TaskStore};
pub use service::ui_state::{Dialog, UiState, GENERIC_WARNING};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
