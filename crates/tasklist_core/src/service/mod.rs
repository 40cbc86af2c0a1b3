//! Use-case layer over the task sequence.
//!
//! # Responsibility
//! - Own domain state (`TaskStore`) and presentation state (`UiState`) as
//!   separate objects.
//! - Keep front ends decoupled from storage details.

pub mod task_store;
pub mod ui_state;
