//! Structured result returned for every interpreted command.

use super::CommandFailure;
use crate::task::domain::{Task, TaskId};
use serde::Serialize;

/// Operation a command resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    /// A task was created.
    Create,
    /// A task was moved to its next state.
    AdvanceState,
    /// A task was completed.
    Complete,
    /// A task was moved to an explicitly requested state.
    SetState,
    /// Tasks were listed.
    List,
    /// A task was deleted.
    Delete,
}

/// Outcome of an interpreted command.
///
/// The shape is the same whichever classifier produced the intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    success: bool,
    message: String,
    action: Option<CommandAction>,
    task_id: Option<TaskId>,
    tasks: Vec<Task>,
    failure: Option<CommandFailure>,
}

impl CommandOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub fn succeeded(action: CommandAction, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            action: Some(action),
            task_id: None,
            tasks: Vec::new(),
            failure: None,
        }
    }

    /// Creates a failed outcome whose message is the failure's description.
    #[must_use]
    pub fn failed(action: Option<CommandAction>, failure: CommandFailure) -> Self {
        Self {
            success: false,
            message: failure.to_string(),
            action,
            task_id: None,
            tasks: Vec::new(),
            failure: Some(failure),
        }
    }

    /// Attaches the affected task identifier.
    #[must_use]
    pub const fn with_task_id(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Attaches the resulting tasks.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Returns whether the command succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the resolved action, if classification succeeded.
    #[must_use]
    pub const fn action(&self) -> Option<CommandAction> {
        self.action
    }

    /// Returns the affected task identifier, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the resulting tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&CommandFailure> {
        self.failure.as_ref()
    }
}
