//! Task record and its mutations.

use super::{TaskBucket, TaskDomainError, TaskId, TaskPatch, TaskPosition, TaskStatus};
use crate::workspace::domain::{ProjectId, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A task placed on a workspace board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    description: Option<String>,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    assigned_id: Option<UserId>,
    status: TaskStatus,
    due_date: DateTime<Utc>,
    position: TaskPosition,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a task that has not been placed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Task name, required to be non-blank.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional assignee.
    pub assigned_id: Option<UserId>,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Requested status; [`TaskStatus::Backlog`] when omitted.
    pub status: Option<TaskStatus>,
}

impl NewTask {
    /// Returns the status the task will be created with.
    #[must_use]
    pub fn effective_status(&self) -> TaskStatus {
        self.status.unwrap_or_default()
    }

    /// Returns the bucket the task will be appended to.
    #[must_use]
    pub fn bucket(&self) -> TaskBucket {
        TaskBucket::new(self.workspace_id, self.project_id, self.effective_status())
    }
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted workspace.
    pub workspace_id: WorkspaceId,
    /// Persisted project.
    pub project_id: ProjectId,
    /// Persisted assignee.
    pub assigned_id: Option<UserId>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted position.
    pub position: TaskPosition,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task at `position` from caller-supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank and
    /// [`TaskDomainError::NameTooLong`] when it exceeds
    /// [`MAX_TASK_NAME_CHARS`].
    pub fn create(
        new_task: NewTask,
        position: TaskPosition,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let status = new_task.effective_status();
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            name: validated_name(new_task.name)?,
            description: new_task.description,
            workspace_id: new_task.workspace_id,
            project_id: new_task.project_id,
            assigned_id: new_task.assigned_id,
            status,
            due_date: new_task.due_date,
            position,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            workspace_id: data.workspace_id,
            project_id: data.project_id,
            assigned_id: data.assigned_id,
            status: data.status,
            due_date: data.due_date,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_id(&self) -> Option<UserId> {
        self.assigned_id
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the ordinal within the task's bucket.
    #[must_use]
    pub const fn position(&self) -> TaskPosition {
        self.position
    }

    /// Returns the bucket the task currently sits in.
    #[must_use]
    pub const fn bucket(&self) -> TaskBucket {
        TaskBucket::new(self.workspace_id, self.project_id, self.status)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `status` at `position`, stamping `updated_at`.
    pub const fn reposition(
        &mut self,
        status: TaskStatus,
        position: TaskPosition,
        updated_at: DateTime<Utc>,
    ) {
        self.status = status;
        self.position = position;
        self.updated_at = updated_at;
    }

    /// Applies a validated field patch, stamping `updated_at`. The position
    /// is left untouched even when the patch moves the task to another
    /// bucket.
    pub fn apply_patch(&mut self, patch: &TaskPatch, updated_at: DateTime<Utc>) {
        if let Some(value) = &patch.name {
            self.name.clone_from(value);
        }
        if let Some(value) = &patch.description {
            self.description.clone_from(value);
        }
        if let Some(value) = patch.project_id {
            self.project_id = value;
        }
        if let Some(value) = patch.assigned_id {
            self.assigned_id = value;
        }
        if let Some(value) = patch.status {
            self.status = value;
        }
        if let Some(value) = patch.due_date {
            self.due_date = value;
        }
        self.updated_at = updated_at;
    }
}

/// Longest task name accepted, in characters.
pub const MAX_TASK_NAME_CHARS: usize = 255;

pub(super) fn validated_name(name: String) -> Result<String, TaskDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTaskName);
    }
    if trimmed.chars().count() > MAX_TASK_NAME_CHARS {
        return Err(TaskDomainError::NameTooLong {
            max: MAX_TASK_NAME_CHARS,
        });
    }
    Ok(trimmed.to_owned())
}
