//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskPatchChangeset, TaskRow},
    schema::tasks,
};
use crate::config::PgPool;
use crate::task::{
    domain::{
        PersistedTaskData, PositionUpdate, Task, TaskBucket, TaskFilter, TaskId, TaskPatch,
        TaskPosition, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::workspace::domain::{ProjectId, UserId, WorkspaceId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let changeset = to_changeset(patch, updated_at);

        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let lookup: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq_any(lookup))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .filter(tasks::workspace_id.eq(filter.workspace_id().into_inner()))
                .into_boxed();
            if let Some(project_id) = filter.project_id() {
                query = query.filter(tasks::project_id.eq(project_id.into_inner()));
            }
            if let Some(assigned_id) = filter.assigned_id() {
                query = query.filter(tasks::assigned_id.eq(assigned_id.into_inner()));
            }
            if let Some(status) = filter.status() {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(due_date) = filter.due_date() {
                query = query.filter(tasks::due_date.eq(due_date));
            }

            let rows = query
                .order((tasks::position.asc(), tasks::updated_at.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn max_position(&self, bucket: &TaskBucket) -> TaskRepositoryResult<Option<TaskPosition>> {
        let bucket = *bucket;
        self.run_blocking(move |connection| {
            let max = tasks::table
                .filter(tasks::workspace_id.eq(bucket.workspace_id.into_inner()))
                .filter(tasks::project_id.eq(bucket.project_id.into_inner()))
                .filter(tasks::status.eq(bucket.status.as_str()))
                .select(diesel::dsl::max(tasks::position))
                .first::<Option<i64>>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            max.map(position_from_column).transpose()
        })
        .await
    }

    async fn reposition(
        &self,
        update: PositionUpdate,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let position = position_to_column(update.position)?;
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(update.id.into_inner()))
                .set((
                    tasks::status.eq(update.status.as_str()),
                    tasks::position.eq(position),
                    tasks::updated_at.eq(updated_at),
                ))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn position_to_column(position: TaskPosition) -> TaskRepositoryResult<i64> {
    i64::try_from(position.value()).map_err(TaskRepositoryError::persistence)
}

fn position_from_column(value: i64) -> TaskRepositoryResult<TaskPosition> {
    let unsigned = u64::try_from(value).map_err(TaskRepositoryError::persistence)?;
    TaskPosition::new(unsigned).map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        name: task.name().to_owned(),
        description: task.description().map(str::to_owned),
        workspace_id: task.workspace_id().into_inner(),
        project_id: task.project_id().into_inner(),
        assigned_id: task.assigned_id().map(UserId::into_inner),
        status: task.status().as_str().to_owned(),
        due_date: task.due_date(),
        position: position_to_column(task.position())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(patch: &TaskPatch, updated_at: DateTime<Utc>) -> TaskPatchChangeset {
    TaskPatchChangeset {
        name: patch.name().map(str::to_owned),
        description: patch
            .description()
            .map(|description| description.map(str::to_owned)),
        project_id: patch.project_id().map(ProjectId::into_inner),
        assigned_id: patch
            .assigned_id()
            .map(|assignee| assignee.map(UserId::into_inner)),
        status: patch.status().map(|status| status.as_str().to_owned()),
        due_date: patch.due_date(),
        updated_at,
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        name,
        description,
        workspace_id,
        project_id,
        assigned_id,
        status: persisted_status,
        due_date,
        position: persisted_position,
        created_at,
        updated_at,
    } = row;

    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let position = position_from_column(persisted_position)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        name,
        description,
        workspace_id: WorkspaceId::from_uuid(workspace_id),
        project_id: ProjectId::from_uuid(project_id),
        assigned_id: assigned_id.map(UserId::from_uuid),
        status,
        due_date,
        position,
        created_at,
        updated_at,
    }))
}
