//! Failure kinds reported by the command interpreter.

use crate::task::domain::IllegalTransition;
use serde::Serialize;
use thiserror::Error;

/// A command that could not be carried out.
///
/// Every variant renders a message that tells the user how to correct the
/// input.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandFailure {
    /// No task title matches the fragment.
    #[error("no tasks found matching '{fragment}'")]
    TaskNotFound {
        /// Fragment that was searched for.
        fragment: String,
    },

    /// More than one task title matches the fragment.
    #[error(
        "multiple tasks match '{fragment}': {}; please be more specific",
        .candidates.join(", ")
    )]
    AmbiguousMatch {
        /// Fragment that was searched for.
        fragment: String,
        /// Titles of every matching task.
        candidates: Vec<String>,
    },

    /// The matched task cannot move to the requested state.
    #[error("'{title}': {transition}")]
    IllegalTransition {
        /// Title of the matched task.
        title: String,
        /// Rejected transition details.
        transition: IllegalTransition,
    },

    /// A field failed validation.
    #[error("{reason}")]
    Validation {
        /// Validation message.
        reason: String,
    },

    /// The input could not be classified.
    #[error(
        "could not understand '{input}'; try 'add a task to ...', 'start ...', \
         'complete ...', 'show my tasks' or 'delete ...'"
    )]
    Unrecognized {
        /// Original command text.
        input: String,
    },

    /// Task storage failed.
    #[error("task storage failed: {reason}")]
    Storage {
        /// Underlying error message.
        reason: String,
    },
}

/// Reasons a language-model response could not be decoded into an intent.
#[derive(Debug, Error)]
pub enum ModelResponseError {
    /// The response was empty.
    #[error("model response was empty")]
    Empty,

    /// The response was not a recognised JSON intent.
    #[error("model response is not a valid intent: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A required task title was missing or blank.
    #[error("model response for '{action}' has no task title")]
    MissingTitle {
        /// Action named in the response.
        action: &'static str,
    },

    /// A state field named no known state.
    #[error("model response names unknown state '{0}'")]
    UnknownState(String),
}
