//! Change notification port used to invalidate cached task views.

use crate::task::domain::TaskId;
use crate::workspace::domain::WorkspaceId;
use serde::Serialize;

/// A committed change to a workspace's tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskChange {
    /// A task was created.
    Created {
        /// Workspace whose task views are stale.
        workspace_id: WorkspaceId,
        /// The new task.
        task_id: TaskId,
    },
    /// Fields of a single task changed.
    Updated {
        /// Workspace whose task views are stale.
        workspace_id: WorkspaceId,
        /// The patched task.
        task_id: TaskId,
    },
    /// A task was deleted.
    Deleted {
        /// Workspace whose task views are stale.
        workspace_id: WorkspaceId,
        /// The removed task.
        task_id: TaskId,
    },
    /// A bulk reorder moved tasks between positions or statuses.
    Reordered {
        /// Workspace whose task views are stale.
        workspace_id: WorkspaceId,
        /// Tasks the reorder actually touched.
        task_ids: Vec<TaskId>,
    },
}

impl TaskChange {
    /// Returns the workspace affected by the change.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        match self {
            Self::Created { workspace_id, .. }
            | Self::Updated { workspace_id, .. }
            | Self::Deleted { workspace_id, .. }
            | Self::Reordered { workspace_id, .. } => *workspace_id,
        }
    }
}

/// Receives task changes after they are persisted.
///
/// Notification is fire-and-forget: implementations must not block and
/// cannot fail the operation that produced the change.
pub trait TaskChangeNotifier: Send + Sync {
    /// Publishes a change.
    fn notify(&self, change: TaskChange);
}
