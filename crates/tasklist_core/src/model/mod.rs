//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the `Task` record and its identifier.
//! - Hold the pure rules applied to task text and task views.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Functions in this module are side-effect free.

pub mod filter;
pub mod task;
pub mod validation;
