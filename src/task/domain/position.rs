//! Ordinal position of a task within its bucket.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative ordinal used to sort tasks inside a bucket.
///
/// Positions are compared numerically everywhere, including in storage,
/// where they are persisted as `BIGINT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TaskPosition(u64);

impl TaskPosition {
    /// Position assigned to the first task of an empty bucket.
    pub const FIRST: Self = Self(0);

    /// Largest position representable in the current `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: u64 = i64::MAX as u64;

    /// Creates a validated position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPosition`] when the value exceeds
    /// `i64::MAX`.
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value > Self::MAX_PERSISTED_VALUE {
            return Err(TaskDomainError::InvalidPosition(value));
        }
        Ok(Self(value))
    }

    /// Returns the position that follows the current bucket maximum.
    ///
    /// `None` (an empty bucket) yields [`Self::FIRST`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PositionOverflow`] when `max` is already
    /// the largest persisted position.
    pub fn after(max: Option<Self>) -> Result<Self, TaskDomainError> {
        match max {
            None => Ok(Self::FIRST),
            Some(current) => current
                .0
                .checked_add(1)
                .filter(|next| *next <= Self::MAX_PERSISTED_VALUE)
                .map(Self)
                .ok_or(TaskDomainError::PositionOverflow(current)),
        }
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for TaskPosition {
    type Error = TaskDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskPosition> for u64 {
    fn from(position: TaskPosition) -> Self {
        position.0
    }
}

impl fmt::Display for TaskPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
