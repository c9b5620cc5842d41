//! In-memory repository for task ordering tests and embedded use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PositionUpdate, Task, TaskBucket, TaskFilter, TaskId, TaskPatch, TaskPosition},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_sequence: u64,
}

/// A task plus the write sequence used to break position ties.
#[derive(Debug, Clone)]
struct StoredTask {
    sequence: u64,
    task: Task,
}

impl InMemoryTaskState {
    fn write(&mut self, task: Task) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.tasks.insert(task.id(), StoredTask { sequence, task });
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.write(task.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(stored) = state.tasks.get(&id) else {
            return Ok(None);
        };
        let mut task = stored.task.clone();
        task.apply_patch(patch, updated_at);
        state.write(task.clone());
        Ok(Some(task))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).map(|stored| stored.task.clone()))
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| state.tasks.get(id).map(|stored| stored.task.clone()))
            .collect())
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut matches: Vec<&StoredTask> = state
            .tasks
            .values()
            .filter(|stored| filter.matches(&stored.task))
            .collect();
        matches.sort_by_key(|stored| (stored.task.position(), stored.sequence));
        Ok(matches.into_iter().map(|stored| stored.task.clone()).collect())
    }

    async fn max_position(&self, bucket: &TaskBucket) -> TaskRepositoryResult<Option<TaskPosition>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|stored| bucket.contains(&stored.task))
            .map(|stored| stored.task.position())
            .max())
    }

    async fn reposition(
        &self,
        update: PositionUpdate,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(stored) = state.tasks.get(&update.id) else {
            return Ok(None);
        };
        let mut task = stored.task.clone();
        task.reposition(update.status, update.position, updated_at);
        state.write(task.clone());
        Ok(Some(task))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.tasks.remove(&id).is_some())
    }
}
