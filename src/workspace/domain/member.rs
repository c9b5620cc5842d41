//! Workspace membership fact.

use super::{UserId, WorkspaceId};
use serde::{Deserialize, Serialize};

/// Association granting a user access to a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    user_id: UserId,
    workspace_id: WorkspaceId,
}

impl Member {
    /// Creates a membership record.
    #[must_use]
    pub const fn new(user_id: UserId, workspace_id: WorkspaceId) -> Self {
        Self {
            user_id,
            workspace_id,
        }
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the workspace the membership grants access to.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }
}
