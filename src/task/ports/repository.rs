//! Repository port for task persistence and ordered lookup.

use crate::task::domain::{
    PositionUpdate, Task, TaskBucket, TaskFilter, TaskId, TaskPatch, TaskPosition,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Writes the fields a validated `patch` sets, plus `updated_at`, to one
    /// task. Fields the patch leaves unset keep their stored values, so a
    /// concurrent reposition is not undone.
    ///
    /// Returns the task as stored, or `None` when no task has that
    /// identifier.
    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks whose identifiers appear in `ids`. Unknown ids are
    /// skipped.
    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks matching `filter`, ordered ascending by position.
    ///
    /// Equal positions are ordered by last write. The in-memory store keeps
    /// a write sequence; the `PostgreSQL` store orders by `updated_at` and
    /// then by identifier, so entries written by one bulk update, which
    /// share a timestamp, fall back to identifier order.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the largest position in `bucket`, or `None` when the bucket
    /// is empty.
    async fn max_position(&self, bucket: &TaskBucket) -> TaskRepositoryResult<Option<TaskPosition>>;

    /// Sets the status and position of one task by identifier.
    ///
    /// Returns the updated task, or `None` when no task has that identifier.
    async fn reposition(
        &self,
        update: PositionUpdate,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Deletes a task by identifier. Returns `false` when nothing was
    /// deleted.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
