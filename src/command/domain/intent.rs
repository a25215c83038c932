//! Structured intents extracted from command text.

use crate::task::domain::{TaskPriority, TaskSchedule, TaskState};
use serde::Serialize;

/// Fields extracted for a create intent.
///
/// A create intent never carries a lifecycle state; new tasks always start
/// not started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateIntent {
    /// Title for the new task.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional priority.
    pub priority: Option<TaskPriority>,
    /// Optional category.
    pub category: Option<String>,
    /// Optional scheduling metadata.
    pub schedule: TaskSchedule,
}

impl CreateIntent {
    /// Creates an intent with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// The structured meaning of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum CommandIntent {
    /// Create a new task.
    Create(CreateIntent),
    /// Move the matching task to its next state.
    AdvanceState {
        /// Title fragment used to find the task.
        title_fragment: String,
    },
    /// Mark the matching task completed.
    Complete {
        /// Title fragment used to find the task.
        title_fragment: String,
    },
    /// Move the matching task to an explicitly requested state.
    ///
    /// The request is checked against the transition table like any other
    /// update, so a target equal to the current state is rejected.
    SetState {
        /// Title fragment used to find the task.
        title_fragment: String,
        /// Requested state.
        state: TaskState,
    },
    /// List the owner's tasks, optionally filtered by state.
    ListByState {
        /// State to filter by, or all tasks when `None`.
        state: Option<TaskState>,
    },
    /// Delete the matching task.
    Delete {
        /// Title fragment used to find the task.
        title_fragment: String,
    },
    /// The input could not be classified.
    Unrecognized,
}

impl CommandIntent {
    /// Returns the title fragment for intents that act on an existing task.
    #[must_use]
    pub fn title_fragment(&self) -> Option<&str> {
        match self {
            Self::AdvanceState { title_fragment }
            | Self::Complete { title_fragment }
            | Self::SetState { title_fragment, .. }
            | Self::Delete { title_fragment } => Some(title_fragment),
            Self::Create(_) | Self::ListByState { .. } | Self::Unrecognized => None,
        }
    }
}

/// Which classifier produced an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentSource {
    /// The external language model.
    Model,
    /// The deterministic pattern parser.
    Fallback,
}

/// An intent together with the classifier that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretedCommand {
    /// Classified intent.
    pub intent: CommandIntent,
    /// Classifier that produced it.
    pub source: IntentSource,
}
