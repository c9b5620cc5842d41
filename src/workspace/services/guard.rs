//! Single membership guard shared by every task operation.

use crate::workspace::{
    domain::{UserId, WorkspaceId},
    ports::{MembershipRepository, MembershipRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Proof that a user holds a membership in a workspace.
///
/// Only [`MembershipGuard::require`] can construct this token, so a function
/// taking `&WorkspaceAccess` cannot be reached without a membership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceAccess {
    user_id: UserId,
    workspace_id: WorkspaceId,
}

impl WorkspaceAccess {
    /// Returns the authorized user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the workspace the token grants access to.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }
}

/// The caller has no membership in the workspace.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("user {user_id} is not a member of workspace {workspace_id}")]
pub struct AccessDenied {
    /// User that was refused.
    pub user_id: UserId,
    /// Workspace the user tried to act on.
    pub workspace_id: WorkspaceId,
}

/// Errors returned by [`MembershipGuard::require`].
#[derive(Debug, Clone, Error)]
pub enum GuardError {
    /// No membership exists for the pair.
    #[error(transparent)]
    Denied(#[from] AccessDenied),
    /// The membership lookup itself failed.
    #[error(transparent)]
    Membership(#[from] MembershipRepositoryError),
}

/// Issues [`WorkspaceAccess`] tokens after checking membership.
#[derive(Debug)]
pub struct MembershipGuard<M>
where
    M: MembershipRepository,
{
    members: Arc<M>,
}

impl<M> Clone for MembershipGuard<M>
where
    M: MembershipRepository,
{
    fn clone(&self) -> Self {
        Self {
            members: Arc::clone(&self.members),
        }
    }
}

impl<M> MembershipGuard<M>
where
    M: MembershipRepository,
{
    /// Creates a guard over a membership repository.
    #[must_use]
    pub const fn new(members: Arc<M>) -> Self {
        Self { members }
    }

    /// Requires a membership for (`user_id`, `workspace_id`).
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Denied`] when no membership exists and
    /// [`GuardError::Membership`] when the lookup fails.
    pub async fn require(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<WorkspaceAccess, GuardError> {
        let member = self.members.find_member(user_id, workspace_id).await?;
        if member.is_none() {
            tracing::warn!(%user_id, %workspace_id, "workspace access denied");
            return Err(AccessDenied {
                user_id,
                workspace_id,
            }
            .into());
        }
        Ok(WorkspaceAccess {
            user_id,
            workspace_id,
        })
    }
}
