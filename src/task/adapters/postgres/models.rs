//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Optional assignee.
    pub assigned_id: Option<uuid::Uuid>,
    /// Workflow status.
    pub status: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Bucket ordinal.
    pub position: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Optional assignee.
    pub assigned_id: Option<uuid::Uuid>,
    /// Workflow status.
    pub status: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Bucket ordinal.
    pub position: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial changeset built from a task patch.
///
/// `None` skips a column; for nullable columns `Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskPatchChangeset {
    /// New name.
    pub name: Option<String>,
    /// New or cleared description.
    pub description: Option<Option<String>>,
    /// New project.
    pub project_id: Option<uuid::Uuid>,
    /// New or cleared assignee.
    pub assigned_id: Option<Option<uuid::Uuid>>,
    /// New workflow status.
    pub status: Option<String>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Last update timestamp, always written.
    pub updated_at: DateTime<Utc>,
}
