//! Shared world state for task ordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use eyre::eyre;
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskId, TaskStatus},
        services::{TaskOrderingService, TaskServiceError},
    },
    workspace::{
        adapters::memory::{InMemoryMembershipRepository, InMemoryUserDirectory},
        domain::{ProjectId, UserId, WorkspaceId},
    },
};

/// Service type used by the BDD world.
pub type TestBoardService = TaskOrderingService<
    InMemoryTaskRepository,
    InMemoryMembershipRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Scenario world for task ordering behaviour tests.
pub struct BoardWorld {
    pub service: TestBoardService,
    pub members: Arc<InMemoryMembershipRepository>,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub member: UserId,
    pub tasks_by_name: HashMap<String, TaskId>,
    pub last_created: Option<Result<Task, TaskServiceError>>,
    pub last_reorder: Option<Result<Vec<Task>, TaskServiceError>>,
}

impl BoardWorld {
    /// Creates a world with one workspace, one project and no members yet.
    #[must_use]
    pub fn new() -> Self {
        let members = Arc::new(InMemoryMembershipRepository::new());
        let service = TaskOrderingService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&members),
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            members,
            workspace_id: WorkspaceId::new(),
            project_id: ProjectId::new(),
            member: UserId::new(),
            tasks_by_name: HashMap::new(),
            last_created: None,
            last_reorder: None,
        }
    }

    /// Resolves a task seeded earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with that name was seeded.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_name
            .get(name)
            .copied()
            .ok_or_else(|| eyre!("no task named {name} in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Parses a column name from a step.
///
/// # Errors
///
/// Returns an error for unknown status names.
pub fn column(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre!("{err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
