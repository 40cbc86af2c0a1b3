//! Persistence layer: key-value backends and the task load/save bridge.
//!
//! # Responsibility
//! - Define the storage contract the task store is injected with.
//! - Isolate serialization and SQL details from the store.
//!
//! # Invariants
//! - Storage failures never propagate past `PersistenceBridge`.

pub mod kv_store;
pub mod persistence;
