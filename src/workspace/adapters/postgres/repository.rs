//! `PostgreSQL` implementation of the membership and user ports.

use super::{
    models::{MemberRow, NewMemberRow, UserRow},
    schema::{members, users},
};
use crate::config::PgPool;
use crate::workspace::{
    domain::{Member, User, UserId, WorkspaceId},
    ports::{
        MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult,
        UserDirectory, UserDirectoryError, UserDirectoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed membership repository and user directory.
#[derive(Debug, Clone)]
pub struct PostgresWorkspaceDirectory {
    pool: PgPool,
}

impl PostgresWorkspaceDirectory {
    /// Creates a directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F, wrap: fn(BlockingError) -> E) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, diesel::result::Error> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BlockingError::Pool)?;
            f(&mut connection).map_err(BlockingError::Query)
        })
        .await
        .map_err(BlockingError::Join)
        .and_then(|result| result)
        .map_err(wrap)
    }
}

/// Failure raised while running a blocking Diesel call.
#[derive(Debug, thiserror::Error)]
pub enum BlockingError {
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// The query itself failed.
    #[error("query error: {0}")]
    Query(#[from] diesel::result::Error),
    /// The blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn membership_error(err: BlockingError) -> MembershipRepositoryError {
    MembershipRepositoryError::persistence(err)
}

fn directory_error(err: BlockingError) -> UserDirectoryError {
    UserDirectoryError::persistence(err)
}

#[async_trait]
impl MembershipRepository for PostgresWorkspaceDirectory {
    async fn add(&self, member: Member) -> MembershipRepositoryResult<()> {
        let row = NewMemberRow {
            user_id: member.user_id().into_inner(),
            workspace_id: member.workspace_id().into_inner(),
        };
        self.run_blocking(
            move |connection| {
                diesel::insert_into(members::table)
                    .values(&row)
                    .on_conflict_do_nothing()
                    .execute(connection)
                    .map(|_| ())
            },
            membership_error,
        )
        .await
    }

    async fn find_member(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> MembershipRepositoryResult<Option<Member>> {
        let row = self
            .run_blocking(
                move |connection| {
                    members::table
                        .filter(members::user_id.eq(user_id.into_inner()))
                        .filter(members::workspace_id.eq(workspace_id.into_inner()))
                        .select(MemberRow::as_select())
                        .first::<MemberRow>(connection)
                        .optional()
                },
                membership_error,
            )
            .await?;
        Ok(row.map(|found| {
            Member::new(
                UserId::from_uuid(found.user_id),
                WorkspaceId::from_uuid(found.workspace_id),
            )
        }))
    }
}

#[async_trait]
impl UserDirectory for PostgresWorkspaceDirectory {
    async fn upsert(&self, user: &User) -> UserDirectoryResult<()> {
        let row = UserRow {
            id: user.id().into_inner(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
        };
        self.run_blocking(
            move |connection| {
                diesel::insert_into(users::table)
                    .values(&row)
                    .on_conflict(users::id)
                    .do_update()
                    .set((users::name.eq(&row.name), users::email.eq(&row.email)))
                    .execute(connection)
                    .map(|_| ())
            },
            directory_error,
        )
        .await
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let lookup: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        let rows = self
            .run_blocking(
                move |connection| {
                    users::table
                        .filter(users::id.eq_any(lookup))
                        .select(UserRow::as_select())
                        .load::<UserRow>(connection)
                },
                directory_error,
            )
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| User::new(UserId::from_uuid(row.id), row.name, row.email))
            .collect())
    }
}
