//! Error types for task domain validation and parsing.

use super::TaskPosition;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name is longer than the stored column allows.
    #[error("task name must be at most {max} characters")]
    NameTooLong {
        /// Largest accepted name length, in characters.
        max: usize,
    },

    /// The position exceeds the persisted range.
    #[error("invalid task position {0}, expected at most {max}", max = i64::MAX)]
    InvalidPosition(u64),

    /// The bucket is already at the largest representable position.
    #[error("no position available after {0}")]
    PositionOverflow(TaskPosition),
}

/// Error returned while parsing task statuses from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
