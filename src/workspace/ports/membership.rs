//! Repository port for workspace membership facts.

use crate::workspace::domain::{Member, UserId, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership repository operations.
pub type MembershipRepositoryResult<T> = Result<T, MembershipRepositoryError>;

/// Membership persistence contract.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Records a membership. Adding an existing membership is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::Persistence`] when the store
    /// rejects the write.
    async fn add(&self, member: Member) -> MembershipRepositoryResult<()>;

    /// Finds the membership of `user_id` in `workspace_id`.
    ///
    /// Returns `None` when the user is not a member.
    async fn find_member(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> MembershipRepositoryResult<Option<Member>>;
}

/// Errors returned by membership repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MembershipRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MembershipRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
