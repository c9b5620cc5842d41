//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{NewTask, TaskStatus},
        services::TaskOrderingService,
    },
    workspace::{
        adapters::memory::{InMemoryMembershipRepository, InMemoryUserDirectory},
        domain::{Member, ProjectId, UserId, WorkspaceId},
        ports::MembershipRepository,
    },
};

/// Service type wired to in-memory adapters.
pub type TestService = TaskOrderingService<
    InMemoryTaskRepository,
    InMemoryMembershipRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// A service with direct access to the stores behind it.
pub struct Board {
    pub service: TestService,
    pub members: Arc<InMemoryMembershipRepository>,
    pub users: Arc<InMemoryUserDirectory>,
}

impl Board {
    /// Adds a new member to `workspace_id` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the membership cannot be stored.
    pub async fn join(&self, workspace_id: WorkspaceId) -> Result<UserId, eyre::Report> {
        let user_id = UserId::new();
        self.members
            .add(Member::new(user_id, workspace_id))
            .await
            .map_err(|err| eyre::eyre!("add membership: {err}"))?;
        Ok(user_id)
    }
}

/// Provides a board backed by fresh in-memory stores.
#[fixture]
pub fn board() -> Board {
    let members = Arc::new(InMemoryMembershipRepository::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let service = TaskOrderingService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&members),
        Arc::clone(&users),
        Arc::new(DefaultClock),
    );
    Board {
        service,
        members,
        users,
    }
}

/// Fixed due date used by seeded tasks.
#[must_use]
pub fn due_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 12, 24, 0, 0, 0)
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
