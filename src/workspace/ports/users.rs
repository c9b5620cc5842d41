//! Lookup port for user records.

use crate::workspace::domain::{User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Read access to user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Stores or replaces a user record.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Persistence`] when the store rejects the
    /// write.
    async fn upsert(&self, user: &User) -> UserDirectoryResult<()>;

    /// Returns the users matching `ids`. Unknown ids are skipped, so the
    /// result may be shorter than the input.
    async fn find_by_ids(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<User>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
