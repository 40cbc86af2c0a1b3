//! Load/save boundary between the task store and a key-value backend.
//!
//! # Responsibility
//! - Read the serialized task sequence once at startup.
//! - Write the full sequence back after every mutation.
//!
//! # Invariants
//! - Neither `load` nor `save` returns an error; failures are logged and the
//!   in-memory sequence stays authoritative.
//! - The blob is a JSON array of `{id, text, completed}` under `STORAGE_KEY`.
//! - Task text is never written to logs.

use crate::model::task::Task;
use crate::repo::kv_store::KeyValueStore;
use log::{debug, error, info, warn};
use serde_json::Value;
use std::time::Instant;

/// Fixed key the task blob is stored under.
pub const STORAGE_KEY: &str = "todos";

/// Persistence bridge over an injected backend.
pub struct PersistenceBridge<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the stored sequence.
    ///
    /// Missing, unreadable, malformed or non-array values all yield an empty
    /// sequence.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=tasks_load module=persistence status=empty reason=missing");
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=persistence status=error error_code=backend_read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        match decode_tasks(&raw) {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=persistence status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Err(reason) => {
                warn!(
                    "event=tasks_load module=persistence status=fallback reason={} bytes={}",
                    reason,
                    raw.len()
                );
                Vec::new()
            }
        }
    }

    /// Writes the full sequence.
    ///
    /// Returns `true` when the backend accepted the write.
    pub fn save(&self, tasks: &[Task]) -> bool {
        let started_at = Instant::now();
        let encoded = match serde_json::to_string(tasks) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=tasks_save module=persistence status=error error_code=serialize_failed error={}",
                    err
                );
                return false;
            }
        };

        match self.backend.set(STORAGE_KEY, &encoded) {
            Ok(()) => {
                debug!(
                    "event=tasks_save module=persistence status=ok count={} bytes={} duration_ms={}",
                    tasks.len(),
                    encoded.len(),
                    started_at.elapsed().as_millis()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=tasks_save module=persistence status=error error_code=backend_write_failed count={} error={}",
                    tasks.len(),
                    err
                );
                false
            }
        }
    }
}

fn decode_tasks(raw: &str) -> Result<Vec<Task>, &'static str> {
    let value: Value = serde_json::from_str(raw).map_err(|_| "malformed_json")?;
    if !value.is_array() {
        return Err("not_array");
    }
    serde_json::from_value(value).map_err(|_| "invalid_record")
}
