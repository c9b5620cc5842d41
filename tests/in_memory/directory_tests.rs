//! Membership and assignee directory behaviour.

use super::helpers::{Board, board};
use rstest::rstest;
use taskboard::workspace::{
    domain::{Member, User, UserId, WorkspaceId},
    ports::{MembershipRepository, UserDirectory},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn membership_is_scoped_to_one_workspace(board: Board) -> Result<(), eyre::Report> {
    let workspace = WorkspaceId::new();
    let user = board.join(workspace).await?;

    let here = board.members.find_member(user, workspace).await?;
    let elsewhere = board.members.find_member(user, WorkspaceId::new()).await?;

    eyre::ensure!(here == Some(Member::new(user, workspace)), "membership missing");
    eyre::ensure!(elsewhere.is_none(), "membership leaked across workspaces");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_membership_is_idempotent(board: Board) -> Result<(), eyre::Report> {
    let workspace = WorkspaceId::new();
    let user = board.join(workspace).await?;

    board.members.add(Member::new(user, workspace)).await?;

    eyre::ensure!(
        board.members.find_member(user, workspace).await?.is_some(),
        "membership should still exist"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_lookup_skips_unknown_and_duplicate_ids(board: Board) -> Result<(), eyre::Report> {
    let known = User::new(UserId::new(), "Linus", "linus@example.com");
    board.users.upsert(&known).await?;
    board
        .users
        .upsert(&User::new(known.id(), "Linus T.", "linus@example.com"))
        .await?;

    let found = board
        .users
        .find_by_ids(&[known.id(), UserId::new(), known.id()])
        .await?;

    eyre::ensure!(found.len() == 1, "expected one user, got {}", found.len());
    eyre::ensure!(
        found.first().map(User::name) == Some("Linus T."),
        "upsert did not replace the stored user"
    );
    Ok(())
}
