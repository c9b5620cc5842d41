//! Value objects describing task lookups and partial updates.

use super::{Task, TaskDomainError, TaskId, TaskPosition, TaskStatus, task::validated_name};
use crate::workspace::domain::{ProjectId, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The (workspace, project, status) triple that scopes task positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskBucket {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Board column.
    pub status: TaskStatus,
}

impl TaskBucket {
    /// Creates a bucket key.
    #[must_use]
    pub const fn new(workspace_id: WorkspaceId, project_id: ProjectId, status: TaskStatus) -> Self {
        Self {
            workspace_id,
            project_id,
            status,
        }
    }

    /// Returns `true` when `task` sits in this bucket.
    #[must_use]
    pub fn contains(&self, task: &Task) -> bool {
        task.bucket() == *self
    }
}

/// Conjunctive filter for listing a workspace's tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    workspace_id: WorkspaceId,
    project_id: Option<ProjectId>,
    assigned_id: Option<UserId>,
    status: Option<TaskStatus>,
    due_date: Option<DateTime<Utc>>,
    search: Option<String>,
}

impl TaskFilter {
    /// Creates a filter matching every task in `workspace_id`.
    #[must_use]
    pub const fn for_workspace(workspace_id: WorkspaceId) -> Self {
        Self {
            workspace_id,
            project_id: None,
            assigned_id: None,
            status: None,
            due_date: None,
            search: None,
        }
    }

    /// Restricts to one project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Restricts to one assignee.
    #[must_use]
    pub fn with_assignee(mut self, assigned_id: UserId) -> Self {
        self.assigned_id = Some(assigned_id);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to tasks due at exactly `due_date`.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Records a free-text search term.
    ///
    /// Text search is not applied yet: the term is carried through so the
    /// interface is stable, but [`Self::matches`] ignores it.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns the workspace every match must belong to.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the project restriction.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the assignee restriction.
    #[must_use]
    pub const fn assigned_id(&self) -> Option<UserId> {
        self.assigned_id
    }

    /// Returns the status restriction.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the due date restriction.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the recorded search term.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns `true` when `task` satisfies every supplied condition.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.workspace_id() == self.workspace_id
            && self.project_id.is_none_or(|id| task.project_id() == id)
            && self
                .assigned_id
                .is_none_or(|id| task.assigned_id() == Some(id))
            && self.status.is_none_or(|status| task.status() == status)
            && self.due_date.is_none_or(|due| task.due_date() == due)
    }
}

/// Partial update for a single task.
///
/// Outer `None` leaves a field unchanged; for nullable fields an inner `None`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub(super) name: Option<String>,
    pub(super) description: Option<Option<String>>,
    pub(super) project_id: Option<ProjectId>,
    pub(super) assigned_id: Option<Option<UserId>>,
    pub(super) status: Option<TaskStatus>,
    pub(super) due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Moves the task to another project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assigned_id: Option<UserId>) -> Self {
        self.assigned_id = Some(assigned_id);
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks and normalizes the patch before it is written; a new name is
    /// trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] or
    /// [`TaskDomainError::NameTooLong`] when the patch sets an invalid name.
    pub fn validated(mut self) -> Result<Self, TaskDomainError> {
        self.name = self.name.map(validated_name).transpose()?;
        Ok(self)
    }

    /// Returns the new name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the description change: `Some(None)` clears it.
    #[must_use]
    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }

    /// Returns the new project, if set.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the assignee change: `Some(None)` unassigns.
    #[must_use]
    pub const fn assigned_id(&self) -> Option<Option<UserId>> {
        self.assigned_id
    }

    /// Returns the new status, if set.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the new due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }
}

/// One entry of a bulk reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    /// Task to move.
    pub id: TaskId,
    /// Target status.
    pub status: TaskStatus,
    /// Target position.
    pub position: TaskPosition,
}
