//! Text validation rules for add and edit.
//!
//! # Responsibility
//! - Decide whether candidate text may be committed to a task.
//!
//! # Invariants
//! - Emptiness is checked before duplication.
//! - Comparison is case-insensitive on trimmed text.
//! - Validation never mutates its inputs.

use crate::model::task::{Task, TaskId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reason a candidate text was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Text is empty or whitespace-only after trimming.
    Empty,
    /// Another task already has the same text, ignoring case.
    Duplicate,
}

impl ValidationError {
    /// Stable machine-readable code used in log lines.
    pub fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Duplicate => "duplicate",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "task text must not be empty"),
            Self::Duplicate => write!(f, "a task with the same text already exists"),
        }
    }
}

impl Error for ValidationError {}

/// Validates candidate task text against the existing sequence.
///
/// `exclude_id` skips one task during the duplicate scan, so an edit can keep
/// (or re-case) its own text.
///
/// Returns the trimmed text on success.
pub fn validate(
    candidate: &str,
    existing: &[Task],
    exclude_id: Option<TaskId>,
) -> Result<String, ValidationError> {
    let trimmed = trim_text(candidate);
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let folded = trimmed.to_lowercase();
    let duplicate = existing
        .iter()
        .filter(|task| Some(task.id) != exclude_id)
        .any(|task| task.text.to_lowercase() == folded);
    if duplicate {
        return Err(ValidationError::Duplicate);
    }

    Ok(trimmed.to_string())
}

/// Trims Unicode whitespace and the byte-order mark from both ends.
///
/// `str::trim` keeps U+FEFF, which text pasted from other tools often carries.
pub fn trim_text(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}
