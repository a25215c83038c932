//! Error types for task domain validation and parsing.

use super::{IllegalTransition, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The reminder offset is outside the supported range.
    #[error("invalid reminder offset {0} minutes, expected 1 to {max}", max = super::ReminderOffset::MAX_MINUTES)]
    InvalidReminderOffset(u32),

    /// The requested state change is not permitted by the transition table.
    #[error("task {task_id}: {transition}")]
    IllegalTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Rejected transition details.
        transition: IllegalTransition,
    },
}

/// Error returned while parsing task states from persistence or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);

/// Error returned while parsing task priorities from persistence or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
