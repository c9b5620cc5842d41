//! Task ordering service over the `PostgreSQL` adapters.

use super::helpers::{TestDatabase, task_input};
use mockable::DefaultClock;
use std::sync::Arc;
use taskboard::{
    task::{
        adapters::postgres::PostgresTaskRepository,
        domain::{PositionUpdate, TaskFilter, TaskPosition, TaskStatus},
        services::{TaskOrderingService, TaskServiceError},
    },
    workspace::{
        adapters::postgres::PostgresWorkspaceDirectory,
        domain::{Member, ProjectId, User, UserId, WorkspaceId},
        ports::{MembershipRepository, UserDirectory},
    },
};

type PostgresService = TaskOrderingService<
    PostgresTaskRepository,
    PostgresWorkspaceDirectory,
    PostgresWorkspaceDirectory,
    DefaultClock,
>;

fn service(db: &TestDatabase) -> (PostgresService, Arc<PostgresWorkspaceDirectory>) {
    let directory = Arc::new(PostgresWorkspaceDirectory::new(db.pool.clone()));
    let service = TaskOrderingService::new(
        Arc::new(PostgresTaskRepository::new(db.pool.clone())),
        Arc::clone(&directory),
        Arc::clone(&directory),
        Arc::new(DefaultClock),
    );
    (service, directory)
}

#[tokio::test(flavor = "multi_thread")]
async fn positions_append_and_are_never_reused() -> Result<(), eyre::Report> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let (service, directory) = service(&db);
    let workspace = WorkspaceId::new();
    let project = ProjectId::new();
    let caller = UserId::new();
    directory.add(Member::new(caller, workspace)).await?;

    let mut created = Vec::new();
    for name in ["A", "B", "C"] {
        created.push(
            service
                .create_task(caller, task_input(workspace, project, name, TaskStatus::Todo))
                .await?,
        );
    }
    service.delete_task(caller, created[1].id()).await?;
    let next = service
        .create_task(caller, task_input(workspace, project, "D", TaskStatus::Todo))
        .await?;

    let positions: Vec<u64> = created.iter().map(|task| task.position().value()).collect();
    eyre::ensure!(positions == [0, 1, 2], "unexpected positions {positions:?}");
    eyre::ensure!(next.position().value() == 3, "position was reused");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_resolves_assignees_and_bulk_update_checks_workspaces()
-> Result<(), eyre::Report> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let (service, directory) = service(&db);
    let first = WorkspaceId::new();
    let second = WorkspaceId::new();
    let project = ProjectId::new();
    let caller = User::new(UserId::new(), "Barbara", "barbara@example.com");
    directory.upsert(&caller).await?;
    directory.add(Member::new(caller.id(), first)).await?;
    directory.add(Member::new(caller.id(), second)).await?;

    let mut input = task_input(first, project, "assigned", TaskStatus::Todo);
    input.assigned_id = Some(caller.id());
    let ours = service.create_task(caller.id(), input).await?;
    let theirs = service
        .create_task(caller.id(), task_input(second, project, "other", TaskStatus::Todo))
        .await?;

    let listed = service
        .list_tasks(caller.id(), TaskFilter::for_workspace(first))
        .await?;
    eyre::ensure!(listed.len() == 1, "expected one task, got {}", listed.len());
    eyre::ensure!(
        listed[0].assigned_user.as_ref().map(User::name) == Some("Barbara"),
        "assignee not resolved"
    );

    let rejected = service
        .bulk_update(
            caller.id(),
            [ours.id(), theirs.id()]
                .into_iter()
                .map(|id| PositionUpdate {
                    id,
                    status: TaskStatus::Done,
                    position: TaskPosition::FIRST,
                })
                .collect(),
        )
        .await;
    eyre::ensure!(
        matches!(rejected, Err(TaskServiceError::MixedWorkspaces { count: 2 })),
        "expected mixed workspace rejection, got {rejected:?}"
    );
    let unchanged = service.get_task(caller.id(), ours.id()).await?;
    eyre::ensure!(unchanged.status() == TaskStatus::Todo, "rejected batch wrote");
    Ok(())
}
