//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklane::command::{adapters::DisabledLanguageModel, services::CommandInterpreter};
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskState},
    services::{CreateTaskRequest, TaskMutationService},
};
use tasklane::user::{
    adapters::memory::InMemoryUserRepository,
    domain::UserId,
    services::{RegisterUserRequest, UserAccountService},
};

/// Task service over an in-memory repository.
pub type TestTasks = TaskMutationService<InMemoryTaskRepository, DefaultClock>;

/// Account service over an in-memory repository.
pub type TestAccounts = UserAccountService<InMemoryUserRepository, DefaultClock>;

/// Interpreter that always uses the fallback parser.
pub type FallbackInterpreter =
    CommandInterpreter<InMemoryTaskRepository, DefaultClock, DisabledLanguageModel>;

/// Provides a fresh task service for each test.
#[fixture]
pub fn tasks() -> TestTasks {
    TaskMutationService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Provides a fresh account service for each test.
#[fixture]
pub fn accounts() -> TestAccounts {
    UserAccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Builds a fallback-only interpreter sharing `tasks`' repository.
pub fn fallback_interpreter(tasks: &TestTasks) -> FallbackInterpreter {
    CommandInterpreter::new(tasks.clone(), Arc::new(DisabledLanguageModel))
}

/// Registers `username` and returns its identifier.
///
/// # Errors
///
/// Returns an error if registration fails.
pub async fn register(accounts: &TestAccounts, username: &str) -> Result<UserId, eyre::Report> {
    let user = accounts
        .register(RegisterUserRequest::new(username, "argon2id$test"))
        .await?;
    Ok(user.id())
}

/// Creates a task for `owner` and walks it forward to `state`.
///
/// # Errors
///
/// Returns an error if creation or any transition fails.
pub async fn seed_task(
    tasks: &TestTasks,
    owner: UserId,
    title: &str,
    state: TaskState,
) -> Result<Task, eyre::Report> {
    let mut task = tasks.create(CreateTaskRequest::new(owner, title)).await?;
    while task.state() != state {
        let next = task
            .state()
            .next()
            .ok_or_else(|| eyre::eyre!("{state} is not reachable"))?;
        task = tasks.transition(owner, task.id(), next).await?;
    }
    Ok(task)
}
