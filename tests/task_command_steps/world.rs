//! Shared world state for command BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklane::command::{
    adapters::ScriptedLanguageModel, domain::CommandOutcome, services::CommandInterpreter,
};
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::TaskMutationService,
};
use tasklane::user::domain::UserId;

/// Service type used by the BDD world.
pub type TestTaskService = TaskMutationService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for command behaviour tests.
pub struct CommandWorld {
    pub service: TestTaskService,
    pub owner: UserId,
    pub model_replies: Vec<String>,
    pub outcome: Option<CommandOutcome>,
}

impl CommandWorld {
    /// Creates a world with an empty task list and no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskMutationService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
            ),
            owner: UserId::new(),
            model_replies: Vec::new(),
            outcome: None,
        }
    }

    /// Builds an interpreter that replays the scripted replies once each.
    #[must_use]
    pub fn interpreter(
        &self,
    ) -> CommandInterpreter<InMemoryTaskRepository, DefaultClock, ScriptedLanguageModel> {
        let model = ScriptedLanguageModel::new(self.model_replies.clone());
        CommandInterpreter::new(self.service.clone(), Arc::new(model))
    }

    /// Returns the outcome of the last command.
    ///
    /// # Errors
    ///
    /// Returns an error when no command has run.
    pub fn outcome(&self) -> Result<&CommandOutcome, eyre::Report> {
        self.outcome
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no command has been executed"))
    }

    /// Returns all of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing fails.
    pub fn tasks(&self) -> Result<Vec<Task>, eyre::Report> {
        Ok(run_async(self.service.list(self.owner, None))?)
    }
}

impl Default for CommandWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CommandWorld {
    CommandWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
