//! Prompt sent to the language model.

use chrono::{NaiveDate, TimeDelta};
use minijinja::{Environment, context};
use thiserror::Error;

const PROMPT_TEMPLATE: &str = r#"You are a personal day planner assistant. Convert the command below into a single JSON object. Today's date is {{ today }}.

Supported actions:
- "create": add a task. Fields: "task_title" (required), "description", "priority" (low, medium, high, urgent), "category", "scheduled_date", "scheduled_time", "due_date", "due_time", "reminder_minutes".
- "advance_state": move a task to its next state. Fields: "task_title" (required).
- "complete": mark a task completed. Fields: "task_title" (required).
- "update_state": move a task to a named state. Fields: "task_title" (required), "new_state" (required: "not_started", "in_progress" or "completed").
- "list": show tasks. Fields: "state_filter" ("not_started", "in_progress" or "completed").
- "delete": remove a task. Fields: "task_title" (required).

Dates use YYYY-MM-DD: "today" is {{ today }} and "tomorrow" is {{ tomorrow }}. Times use 24-hour HH:MM, for example "15:00" for 3 PM. Write actual dates and times, never format placeholders. Only include relevant fields.

Examples:
- "Schedule meeting tomorrow at 3pm" -> {"action": "create", "task_title": "meeting", "due_date": "{{ tomorrow }}", "due_time": "15:00"}
- "Start working on the report" -> {"action": "advance_state", "task_title": "report"}
- "Show my completed tasks" -> {"action": "list", "state_filter": "completed"}

Command: "{{ command }}"

Respond with JSON only."#;

/// Error raised when the prompt template cannot be rendered.
#[derive(Debug, Error)]
#[error("failed to render model prompt: {0}")]
pub struct PromptError(#[from] minijinja::Error);

/// Renders the classification prompt for `command`.
///
/// # Errors
///
/// Returns [`PromptError`] when template rendering fails.
pub fn render_prompt(command: &str, today: NaiveDate) -> Result<String, PromptError> {
    let tomorrow = today.checked_add_signed(TimeDelta::days(1)).unwrap_or(today);
    let environment = Environment::new();
    Ok(environment.render_str(
        PROMPT_TEMPLATE,
        context! {
            command => command,
            today => today.to_string(),
            tomorrow => tomorrow.to_string(),
        },
    )?)
}
