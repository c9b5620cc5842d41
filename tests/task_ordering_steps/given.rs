//! Given steps for task ordering BDD scenarios.

use super::world::{BoardWorld, column, run_async};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::{
    task::domain::NewTask,
    workspace::{
        domain::{Member, WorkspaceId},
        ports::MembershipRepository,
    },
};

#[given("a member of a workspace")]
fn member_of_workspace(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(
        world
            .members
            .add(Member::new(world.member, world.workspace_id)),
    )
    .wrap_err("add scenario membership")
}

#[given(r#"a task "{name}" in the "{status}" column"#)]
fn task_in_column(world: &mut BoardWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let input = NewTask {
        workspace_id: world.workspace_id,
        project_id: world.project_id,
        name: name.clone(),
        description: None,
        assigned_id: None,
        due_date: Utc::now(),
        status: Some(column(&status)?),
    };
    let task = run_async(world.service.create_task(world.member, input))
        .wrap_err("seed scenario task")?;
    world.tasks_by_name.insert(name, task.id());
    Ok(())
}

#[given(r#"a task "{name}" in another workspace the member belongs to"#)]
fn task_in_other_workspace(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let other = WorkspaceId::new();
    run_async(world.members.add(Member::new(world.member, other)))
        .wrap_err("add second membership")?;
    let input = NewTask {
        workspace_id: other,
        project_id: world.project_id,
        name: name.clone(),
        description: None,
        assigned_id: None,
        due_date: Utc::now(),
        status: None,
    };
    let task = run_async(world.service.create_task(world.member, input))
        .wrap_err("seed foreign task")?;
    world.tasks_by_name.insert(name, task.id());
    Ok(())
}
