//! Shared helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use eyre::WrapErr;
use taskboard::{
    config::{DatabaseConfig, PgPool},
    task::domain::{NewTask, TaskStatus},
    workspace::domain::{ProjectId, WorkspaceId},
};
use uuid::Uuid;

/// Environment variable naming the server used by these tests.
pub const TEST_DATABASE_URL_VAR: &str = "TASKBOARD_TEST_DATABASE_URL";

/// SQL creating the full schema.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_task_board/up.sql");

/// A migrated, isolated schema that is dropped with the value.
pub struct TestDatabase {
    pub pool: PgPool,
    base_url: String,
    schema: String,
}

impl TestDatabase {
    /// Creates a fresh schema and a pool whose connections use it.
    ///
    /// Returns `None` when no test server is configured.
    ///
    /// # Errors
    ///
    /// Returns an error when the schema cannot be created or migrated.
    pub fn create() -> Result<Option<Self>, eyre::Report> {
        let Ok(base_url) = std::env::var(TEST_DATABASE_URL_VAR) else {
            tracing::warn!("{TEST_DATABASE_URL_VAR} is unset; skipping PostgreSQL test");
            return Ok(None);
        };
        let schema = format!("taskboard_test_{}", Uuid::new_v4().simple());
        let mut admin = PgConnection::establish(&base_url).wrap_err("connect to test server")?;
        admin
            .batch_execute(&format!("CREATE SCHEMA {schema}"))
            .wrap_err("create test schema")?;

        let separator = if base_url.contains('?') { '&' } else { '?' };
        let url = format!("{base_url}{separator}options=-csearch_path%3D{schema}");
        let mut config = DatabaseConfig::new(url);
        config.max_connections = 4;
        let pool = config.build_pool().wrap_err("build test pool")?;
        pool.get()
            .wrap_err("check out migration connection")?
            .batch_execute(CREATE_SCHEMA_SQL)
            .wrap_err("apply schema")?;

        Ok(Some(Self {
            pool,
            base_url,
            schema,
        }))
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let dropped = PgConnection::establish(&self.base_url).and_then(|mut admin| {
            admin
                .batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
                .map_err(|err| diesel::ConnectionError::BadConnection(err.to_string()))
        });
        if let Err(err) = dropped {
            tracing::warn!(schema = %self.schema, error = %err, "failed to drop test schema");
        }
    }
}

/// Due date at whole-second precision so it survives storage unchanged.
#[must_use]
pub fn due_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 1, 15, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Builds creation input for `name` in the given bucket.
#[must_use]
pub fn task_input(
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    name: &str,
    status: TaskStatus,
) -> NewTask {
    NewTask {
        workspace_id,
        project_id,
        name: name.to_owned(),
        description: None,
        assigned_id: None,
        due_date: due_date(),
        status: Some(status),
    }
}
