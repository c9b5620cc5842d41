//! Request and response bodies for the task API.

use super::ApiError;
use crate::task::domain::{NewTask, PositionUpdate, Task, TaskFilter, TaskId, TaskPatch, TaskStatus};
use crate::task::services::TaskWithAssignee;
use crate::workspace::domain::{ProjectId, User, UserId, WorkspaceId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Success envelope: `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    /// Response payload.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wraps a payload.
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}

/// Plain acknowledgement: `{ "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    /// Human-readable acknowledgement.
    pub message: String,
}

/// Query string of `GET /tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    /// Workspace to list.
    pub workspace_id: WorkspaceId,
    /// Optional project restriction.
    pub project_id: Option<ProjectId>,
    /// Optional assignee restriction. The spelling is part of the public
    /// interface.
    pub assigneed_id: Option<UserId>,
    /// Optional status restriction.
    pub status: Option<TaskStatus>,
    /// Free-text search, accepted but not applied.
    pub search: Option<String>,
    /// Optional exact due date.
    pub due_date: Option<String>,
}

impl ListTasksQuery {
    /// Converts the query into a task filter.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when `dueDate` cannot be parsed.
    pub fn into_filter(self) -> Result<TaskFilter, ApiError> {
        let mut filter = TaskFilter::for_workspace(self.workspace_id);
        if let Some(project_id) = self.project_id {
            filter = filter.with_project(project_id);
        }
        if let Some(assigned_id) = self.assigneed_id {
            filter = filter.with_assignee(assigned_id);
        }
        if let Some(status) = self.status {
            filter = filter.with_status(status);
        }
        if let Some(search) = self.search.filter(|term| !term.is_empty()) {
            filter = filter.with_search(search);
        }
        if let Some(raw) = self.due_date.filter(|raw| !raw.is_empty()) {
            filter = filter.with_due_date(parse_due_date(&raw)?);
        }
        Ok(filter)
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional assignee.
    pub assigned_id: Option<UserId>,
    /// Due date, RFC 3339 or `YYYY-MM-DD`.
    pub due_date: String,
    /// Optional initial status.
    pub status: Option<TaskStatus>,
}

impl CreateTaskBody {
    /// Converts the body into domain input.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when `dueDate` cannot be parsed.
    pub fn into_new_task(self) -> Result<NewTask, ApiError> {
        Ok(NewTask {
            workspace_id: self.workspace_id,
            project_id: self.project_id,
            name: self.name,
            description: self.description,
            assigned_id: self.assigned_id,
            due_date: parse_due_date(&self.due_date)?,
            status: self.status,
        })
    }
}

/// Body of `PATCH /tasks/:taskId`. Absent fields are left unchanged;
/// `null` clears `description` and `assignedId`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    /// New name.
    pub name: Option<String>,
    /// New or cleared description.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// New project.
    pub project_id: Option<ProjectId>,
    /// New or cleared assignee.
    #[serde(default, deserialize_with = "present")]
    pub assigned_id: Option<Option<UserId>>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New due date.
    pub due_date: Option<String>,
}

impl UpdateTaskBody {
    /// Converts the body into a domain patch.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when `dueDate` cannot be parsed.
    pub fn into_patch(self) -> Result<TaskPatch, ApiError> {
        let mut patch = TaskPatch::new();
        if let Some(name) = self.name {
            patch = patch.with_name(name);
        }
        if let Some(description) = self.description {
            patch = patch.with_description(description);
        }
        if let Some(project_id) = self.project_id {
            patch = patch.with_project(project_id);
        }
        if let Some(assigned_id) = self.assigned_id {
            patch = patch.with_assignee(assigned_id);
        }
        if let Some(status) = self.status {
            patch = patch.with_status(status);
        }
        if let Some(raw) = self.due_date {
            patch = patch.with_due_date(parse_due_date(&raw)?);
        }
        Ok(patch)
    }
}

/// Body of `POST /tasks/bulk-update`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateBody {
    /// Entries to apply.
    pub tasks: Vec<PositionUpdate>,
}

/// Task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Optional assignee.
    pub assigned_id: Option<UserId>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Ordinal within the bucket.
    pub position: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().to_owned(),
            description: task.description().map(str::to_owned),
            workspace_id: task.workspace_id(),
            project_id: task.project_id(),
            assigned_id: task.assigned_id(),
            status: task.status(),
            due_date: task.due_date(),
            position: task.position().value(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Assignee summary embedded in listed tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
        }
    }
}

/// Listed task with its resolved assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedTaskResponse {
    /// Task fields.
    #[serde(flatten)]
    pub task: TaskResponse,
    /// Assignee, `null` when unassigned or unknown.
    pub assigned_user: Option<UserResponse>,
}

impl From<&TaskWithAssignee> for ListedTaskResponse {
    fn from(listed: &TaskWithAssignee) -> Self {
        Self {
            task: TaskResponse::from(&listed.task),
            assigned_user: listed.assigned_user.as_ref().map(UserResponse::from),
        }
    }
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
///
/// # Errors
///
/// Returns an invalid-request error for any other format.
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    let trimmed = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| ApiError::invalid_request(format!("invalid dueDate: {raw}")))
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field
/// (`None`, via `#[serde(default)]`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
