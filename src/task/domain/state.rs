//! Task lifecycle states and the transition table that governs them.
//!
//! The table is the single source of truth for transition legality. Manual
//! updates and interpreted commands both reach it through
//! [`super::Task::transition_to`].

use super::ParseTaskStateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Task has been created but work has not started.
    NotStarted,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed.
    Completed,
}

/// Every state, in progress order.
pub const ALL_TASK_STATES: [TaskState; 3] = [
    TaskState::NotStarted,
    TaskState::InProgress,
    TaskState::Completed,
];

impl TaskState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Returns the states reachable from `self` in one step.
    ///
    /// The set is empty for [`TaskState::Completed`].
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::NotStarted => &[Self::InProgress],
            Self::InProgress => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    /// Returns whether moving from `self` to `target` is allowed.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Returns the single legal next state, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.allowed_transitions() {
            [next] => Some(*next),
            _ => None,
        }
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Checks a requested transition against the table.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalTransition`] carrying the current state, the requested
    /// state and the allowed next states when the move is not permitted.
    pub fn validate_transition(self, target: Self) -> Result<(), IllegalTransition> {
        if self.can_transition_to(target) {
            return Ok(());
        }
        Err(IllegalTransition {
            from: self,
            to: target,
        })
    }

    /// Returns the full transition table, one row per state.
    #[must_use]
    pub fn transition_table() -> Vec<(Self, &'static [Self])> {
        ALL_TASK_STATES
            .iter()
            .map(|state| (*state, state.allowed_transitions()))
            .collect()
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    /// Accepts storage values and display labels, ignoring case, spaces and
    /// hyphens.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "not_started" | "notstarted" | "todo" | "pending" => Ok(Self::NotStarted),
            "in_progress" | "inprogress" | "started" => Ok(Self::InProgress),
            "completed" | "complete" | "done" => Ok(Self::Completed),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A transition request the table rejects.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize)]
#[error(
    "cannot move a task from '{from}' to '{to}'; allowed next states: {}",
    describe_allowed(.from.allowed_transitions())
)]
pub struct IllegalTransition {
    /// State the task is currently in.
    pub from: TaskState,
    /// State that was requested.
    pub to: TaskState,
}

impl IllegalTransition {
    /// Returns the states the task could legally move to instead.
    #[must_use]
    pub const fn allowed(&self) -> &'static [TaskState] {
        self.from.allowed_transitions()
    }
}

fn describe_allowed(allowed: &[TaskState]) -> String {
    if allowed.is_empty() {
        return "none (the task is already completed)".to_owned();
    }
    allowed
        .iter()
        .map(|state| format!("'{state}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
