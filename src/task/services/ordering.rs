//! Service layer for positional task creation, listing and bulk reorder.

use crate::task::{
    adapters::notify::NoopTaskChangeNotifier,
    domain::{
        NewTask, PositionUpdate, Task, TaskDomainError, TaskFilter, TaskId, TaskPatch,
        TaskPosition,
    },
    ports::{TaskChange, TaskChangeNotifier, TaskRepository, TaskRepositoryError},
};
use crate::workspace::{
    domain::{User, UserId, WorkspaceId},
    ports::{MembershipRepository, MembershipRepositoryError, UserDirectory, UserDirectoryError},
    services::{AccessDenied, GuardError, MembershipGuard, WorkspaceAccess},
};
use futures::future::join_all;
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The caller is not a member of the task's workspace.
    #[error(transparent)]
    Unauthorized(#[from] AccessDenied),

    /// A bulk update referenced tasks from a number of workspaces other
    /// than one.
    #[error("tasks must belong to the same workspace, found {count}")]
    MixedWorkspaces {
        /// Number of distinct workspaces the batch resolved to.
        count: usize,
    },

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task store operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Membership lookup failed.
    #[error(transparent)]
    Membership(#[from] MembershipRepositoryError),

    /// Assignee lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl From<GuardError> for TaskServiceError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Denied(denied) => Self::Unauthorized(denied),
            GuardError::Membership(source) => Self::Membership(source),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// A listed task with its assignee resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithAssignee {
    /// The task record.
    pub task: Task,
    /// The assignee, or `None` when unassigned or the user no longer exists.
    pub assigned_user: Option<User>,
}

/// Task ordering orchestration service.
pub struct TaskOrderingService<R, M, U, C>
where
    R: TaskRepository,
    M: MembershipRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    guard: MembershipGuard<M>,
    users: Arc<U>,
    clock: Arc<C>,
    notifier: Arc<dyn TaskChangeNotifier>,
}

impl<R, M, U, C> Clone for TaskOrderingService<R, M, U, C>
where
    R: TaskRepository,
    M: MembershipRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            guard: self.guard.clone(),
            users: Arc::clone(&self.users),
            clock: Arc::clone(&self.clock),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<R, M, U, C> TaskOrderingService<R, M, U, C>
where
    R: TaskRepository,
    M: MembershipRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a service that publishes changes nowhere.
    #[must_use]
    pub fn new(tasks: Arc<R>, members: Arc<M>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            guard: MembershipGuard::new(members),
            users,
            clock,
            notifier: Arc::new(NoopTaskChangeNotifier),
        }
    }

    /// Replaces the change notifier used to invalidate cached task views.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn TaskChangeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Creates a task at the end of its bucket.
    ///
    /// The new position is one past the largest position in the task's
    /// (workspace, project, status) bucket, or zero for an empty bucket.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when `caller` is not a
    /// member of the workspace, [`TaskServiceError::Domain`] for an invalid
    /// name or an exhausted bucket, and store errors otherwise.
    #[tracing::instrument(
        skip_all,
        fields(caller = %caller, workspace_id = %new_task.workspace_id)
    )]
    pub async fn create_task(&self, caller: UserId, new_task: NewTask) -> TaskServiceResult<Task> {
        let access = self.authorize(caller, new_task.workspace_id).await?;

        let bucket = new_task.bucket();
        let max = self.tasks.max_position(&bucket).await?;
        let position = TaskPosition::after(max)?;
        let task = Task::create(new_task, position, &*self.clock)?;
        self.tasks.insert(&task).await?;

        tracing::debug!(task_id = %task.id(), %position, "task created");
        self.notifier.notify(TaskChange::Created {
            workspace_id: access.workspace_id(),
            task_id: task.id(),
        });
        Ok(task)
    }

    /// Lists a workspace's tasks ordered by position, with assignees
    /// resolved.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when `caller` is not a
    /// member of the filtered workspace, and store errors otherwise.
    #[tracing::instrument(
        skip_all,
        fields(caller = %caller, workspace_id = %filter.workspace_id())
    )]
    pub async fn list_tasks(
        &self,
        caller: UserId,
        filter: TaskFilter,
    ) -> TaskServiceResult<Vec<TaskWithAssignee>> {
        self.authorize(caller, filter.workspace_id()).await?;
        if let Some(term) = filter.search() {
            tracing::debug!(search = term, "text search is not applied to task listings");
        }

        let tasks = self.tasks.list(&filter).await?;
        let assignee_ids: Vec<UserId> = tasks
            .iter()
            .filter_map(Task::assigned_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let users_by_id: HashMap<UserId, User> = if assignee_ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_by_ids(&assignee_ids)
                .await?
                .into_iter()
                .map(|user| (user.id(), user))
                .collect()
        };

        Ok(tasks
            .into_iter()
            .map(|task| {
                let assigned_user = task
                    .assigned_id()
                    .and_then(|id| users_by_id.get(&id).cloned());
                TaskWithAssignee {
                    task,
                    assigned_user,
                }
            })
            .collect())
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist
    /// and [`TaskServiceError::Unauthorized`] when `caller` is not a member of
    /// its workspace.
    pub async fn get_task(&self, caller: UserId, id: TaskId) -> TaskServiceResult<Task> {
        let task = self.require_task(id).await?;
        self.authorize(caller, task.workspace_id()).await?;
        Ok(task)
    }

    /// Applies a field patch to one task. Positions are never recomputed.
    ///
    /// Only the fields the patch sets are written, so a concurrent reorder
    /// of the same task survives. An empty patch writes and publishes
    /// nothing and returns the task as stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`],
    /// [`TaskServiceError::Unauthorized`], [`TaskServiceError::Domain`] for an
    /// invalid name, and store errors otherwise.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_task(
        &self,
        caller: UserId,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskServiceResult<Task> {
        let task = self.require_task(id).await?;
        let access = self.authorize(caller, task.workspace_id()).await?;

        let changes = patch.validated()?;
        if changes.is_empty() {
            tracing::debug!("empty patch, nothing written");
            return Ok(task);
        }
        let updated = self
            .tasks
            .update(id, &changes, self.clock.utc())
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;

        self.notifier.notify(TaskChange::Updated {
            workspace_id: access.workspace_id(),
            task_id: id,
        });
        Ok(updated)
    }

    /// Deletes one task. Remaining positions in its bucket are left as they
    /// are.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// [`TaskServiceError::Unauthorized`] when `caller` is not a member of
    /// its workspace, and store errors otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, caller: UserId, id: TaskId) -> TaskServiceResult<()> {
        let task = self.require_task(id).await?;
        let access = self.authorize(caller, task.workspace_id()).await?;

        if !self.tasks.delete(id).await? {
            return Err(TaskServiceError::NotFound(id));
        }

        self.notifier.notify(TaskChange::Deleted {
            workspace_id: access.workspace_id(),
            task_id: id,
        });
        Ok(())
    }

    /// Applies a batch of status and position changes.
    ///
    /// Every referenced task must belong to one workspace the caller is a
    /// member of; otherwise nothing is written. Entries are then written
    /// concurrently and independently, without a transaction: when one
    /// fails, the others may still have been applied. Entries naming unknown
    /// tasks are skipped. Returns the tasks as written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::MixedWorkspaces`] when the batch resolves
    /// to zero or several workspaces, [`TaskServiceError::Unauthorized`] when
    /// `caller` is not a member of the batch's workspace, and the first store
    /// error once every entry has settled.
    #[tracing::instrument(skip_all, fields(caller = %caller, entries = updates.len()))]
    pub async fn bulk_update(
        &self,
        caller: UserId,
        updates: Vec<PositionUpdate>,
    ) -> TaskServiceResult<Vec<Task>> {
        let ids: Vec<TaskId> = updates.iter().map(|update| update.id).collect();
        let existing = self.tasks.find_by_ids(&ids).await?;
        let workspace_id = single_workspace(&existing)?;
        let access = self.authorize(caller, workspace_id).await?;

        let known: HashSet<TaskId> = existing.iter().map(Task::id).collect();
        let updated_at = self.clock.utc();
        let outcomes = join_all(
            updates
                .into_iter()
                .filter(|update| known.contains(&update.id))
                .map(|update| self.tasks.reposition(update, updated_at)),
        )
        .await;

        let mut updated = Vec::with_capacity(outcomes.len());
        let mut first_error = None;
        for outcome in outcomes {
            match outcome {
                Ok(Some(task)) => updated.push(task),
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(error = %err, "bulk reorder entry failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        if !updated.is_empty() {
            self.notifier.notify(TaskChange::Reordered {
                workspace_id: access.workspace_id(),
                task_ids: updated.iter().map(Task::id).collect(),
            });
        }
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(updated),
        }
    }

    async fn authorize(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
    ) -> TaskServiceResult<WorkspaceAccess> {
        Ok(self.guard.require(caller, workspace_id).await?)
    }

    async fn require_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }
}

fn single_workspace(tasks: &[Task]) -> TaskServiceResult<WorkspaceId> {
    let workspaces: HashSet<WorkspaceId> = tasks.iter().map(Task::workspace_id).collect();
    let mut iter = workspaces.iter();
    match (iter.next(), iter.next()) {
        (Some(workspace_id), None) => Ok(*workspace_id),
        _ => Err(TaskServiceError::MixedWorkspaces {
            count: workspaces.len(),
        }),
    }
}
