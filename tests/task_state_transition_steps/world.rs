//! Shared world state for task state transition BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskMutationError, TaskMutationService},
};
use tasklane::user::domain::UserId;

/// Service type used by the BDD world.
pub type TestTaskService = TaskMutationService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task transition behaviour tests.
pub struct TaskTransitionWorld {
    pub service: TestTaskService,
    pub owner: UserId,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskMutationError>>,
}

impl TaskTransitionWorld {
    /// Creates a world with a fresh owner and no task.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskMutationService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            owner: UserId::new(),
            task: None,
            last_result: None,
        }
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Returns the most recent mutation result.
    ///
    /// # Errors
    ///
    /// Returns an error when no mutation has been attempted.
    pub fn last_result(&self) -> Result<&Result<Task, TaskMutationError>, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing mutation result in scenario world"))
    }
}

impl Default for TaskTransitionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskTransitionWorld {
    TaskTransitionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a state name written in a feature file.
///
/// # Errors
///
/// Returns an error when the name is not a known state.
pub fn parse_state(name: &str) -> Result<tasklane::task::domain::TaskState, eyre::Report> {
    tasklane::task::domain::TaskState::try_from(name)
        .map_err(|err| eyre::eyre!("invalid state in scenario: {err}"))
}
