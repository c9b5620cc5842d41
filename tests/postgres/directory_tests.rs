//! Membership and user lookup against `PostgreSQL`.

use super::helpers::TestDatabase;
use diesel::prelude::*;
use diesel::sql_types;
use taskboard::workspace::{
    adapters::postgres::PostgresWorkspaceDirectory,
    domain::{Member, User, UserId, WorkspaceId},
    ports::{MembershipRepository, UserDirectory},
};

#[tokio::test(flavor = "multi_thread")]
async fn membership_add_is_idempotent_and_scoped() -> Result<(), eyre::Report> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let directory = PostgresWorkspaceDirectory::new(db.pool.clone());
    let user = UserId::new();
    let workspace = WorkspaceId::new();

    directory.add(Member::new(user, workspace)).await?;
    directory.add(Member::new(user, workspace)).await?;

    let here = directory.find_member(user, workspace).await?;
    let elsewhere = directory.find_member(user, WorkspaceId::new()).await?;
    eyre::ensure!(here == Some(Member::new(user, workspace)), "membership missing");
    eyre::ensure!(elsewhere.is_none(), "membership leaked across workspaces");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn users_are_upserted_and_found_in_bulk() -> Result<(), eyre::Report> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let directory = PostgresWorkspaceDirectory::new(db.pool.clone());
    let ada = User::new(UserId::new(), "Ada", "ada@example.com");
    let alan = User::new(UserId::new(), "Alan", "alan@example.com");
    directory.upsert(&ada).await?;
    directory.upsert(&alan).await?;
    directory
        .upsert(&User::new(ada.id(), "Ada L.", "ada@example.com"))
        .await?;

    let mut found = directory
        .find_by_ids(&[ada.id(), alan.id(), UserId::new()])
        .await?;
    found.sort_by(|left, right| left.name().cmp(right.name()));

    let names: Vec<&str> = found.iter().map(User::name).collect();
    eyre::ensure!(names == ["Ada L.", "Alan"], "unexpected users {names:?}");
    Ok(())
}

#[derive(QueryableByName)]
struct MembershipStamp {
    #[diesel(sql_type = sql_types::Bool)]
    stamped_by_server: bool,
}

#[tokio::test(flavor = "multi_thread")]
async fn membership_creation_time_comes_from_the_server() -> Result<(), eyre::Report> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let directory = PostgresWorkspaceDirectory::new(db.pool.clone());
    let user = UserId::new();
    directory.add(Member::new(user, WorkspaceId::new())).await?;

    let mut connection = db.pool.get()?;
    let stamp = diesel::sql_query(
        "SELECT created_at <= NOW() AS stamped_by_server FROM members WHERE user_id = $1",
    )
    .bind::<sql_types::Uuid, _>(user.into_inner())
    .get_result::<MembershipStamp>(&mut connection)?;

    eyre::ensure!(stamp.stamped_by_server, "membership created_at was not set");
    Ok(())
}
