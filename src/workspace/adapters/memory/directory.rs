//! In-memory membership and user stores for tests and embedded use.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::workspace::{
    domain::{Member, User, UserId, WorkspaceId},
    ports::{
        MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult,
        UserDirectory, UserDirectoryError, UserDirectoryResult,
    },
};

/// Thread-safe in-memory membership repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    members: Arc<RwLock<HashSet<Member>>>,
}

impl InMemoryMembershipRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn add(&self, member: Member) -> MembershipRepositoryResult<()> {
        let mut members = self.members.write().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        members.insert(member);
        Ok(())
    }

    async fn find_member(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> MembershipRepositoryResult<Option<Member>> {
        let members = self.members.read().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let candidate = Member::new(user_id, workspace_id);
        Ok(members.get(&candidate).copied())
    }
}

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn upsert(&self, user: &User) -> UserDirectoryResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<User>> {
        let users = self
            .users
            .read()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| users.get(id).cloned())
            .collect())
    }
}
