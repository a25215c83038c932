//! Decoding of untrusted language-model output into intents.

use super::{
    CommandIntent, CreateIntent, ModelResponseError,
    temporal::{normalize_date, normalize_time},
};
use crate::task::domain::{ReminderOffset, TaskPriority, TaskSchedule, TaskState};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum RawIntent {
    Create {
        task_title: Option<String>,
        description: Option<String>,
        priority: Option<String>,
        category: Option<String>,
        scheduled_date: Option<String>,
        scheduled_time: Option<String>,
        due_date: Option<String>,
        due_time: Option<String>,
        #[serde(alias = "reminder_time")]
        reminder_minutes: Option<Value>,
    },
    #[serde(alias = "start")]
    AdvanceState { task_title: Option<String> },
    Complete { task_title: Option<String> },
    UpdateState {
        task_title: Option<String>,
        new_state: String,
    },
    List { state_filter: Option<String> },
    Delete { task_title: Option<String> },
}

/// Decodes a model response into an intent.
///
/// The response must be a JSON object tagged by `action`, optionally wrapped
/// in a Markdown code fence. Actions that target a task require a non-blank
/// `task_title`. Optional create fields that cannot be normalised are
/// dropped with a warning, and any state supplied with a create action is
/// ignored.
///
/// # Errors
///
/// Returns [`ModelResponseError`] when the response is empty, is not a known
/// action, lacks a required title or names an unknown state.
pub fn decode_model_response(
    raw: &str,
    today: NaiveDate,
) -> Result<CommandIntent, ModelResponseError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(ModelResponseError::Empty);
    }

    match serde_json::from_str::<RawIntent>(body)? {
        RawIntent::Create {
            task_title,
            description,
            priority,
            category,
            scheduled_date,
            scheduled_time,
            due_date,
            due_time,
            reminder_minutes,
        } => {
            let schedule = TaskSchedule {
                scheduled_date: optional_date("scheduled_date", scheduled_date.as_deref(), today),
                scheduled_time: optional_time("scheduled_time", scheduled_time.as_deref()),
                due_date: optional_date("due_date", due_date.as_deref(), today),
                due_time: optional_time("due_time", due_time.as_deref()),
                reminder: reminder_minutes.as_ref().and_then(optional_reminder),
            };
            Ok(CommandIntent::Create(CreateIntent {
                title: required_title("create", task_title)?,
                description: non_blank(description),
                priority: priority.and_then(|value| {
                    TaskPriority::try_from(value.as_str())
                        .inspect_err(|err| warn!(%err, "dropping model priority"))
                        .ok()
                }),
                category: non_blank(category),
                schedule,
            }))
        }
        RawIntent::AdvanceState { task_title } => Ok(CommandIntent::AdvanceState {
            title_fragment: required_title("advance_state", task_title)?,
        }),
        RawIntent::Complete { task_title } => Ok(CommandIntent::Complete {
            title_fragment: required_title("complete", task_title)?,
        }),
        RawIntent::UpdateState {
            task_title,
            new_state,
        } => {
            let title_fragment = required_title("update_state", task_title)?;
            Ok(CommandIntent::SetState {
                title_fragment,
                state: parse_state(&new_state)?,
            })
        }
        RawIntent::List { state_filter } => Ok(CommandIntent::ListByState {
            state: non_blank(state_filter)
                .map(|value| parse_state(&value))
                .transpose()?,
        }),
        RawIntent::Delete { task_title } => Ok(CommandIntent::Delete {
            title_fragment: required_title("delete", task_title)?,
        }),
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(fenced) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let after_info = fenced.split_once('\n').map_or("", |(_, rest)| rest);
    after_info
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(after_info)
        .trim()
}

fn required_title(
    action: &'static str,
    title: Option<String>,
) -> Result<String, ModelResponseError> {
    non_blank(title).ok_or(ModelResponseError::MissingTitle { action })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn parse_state(value: &str) -> Result<TaskState, ModelResponseError> {
    TaskState::try_from(value).map_err(|_| ModelResponseError::UnknownState(value.to_owned()))
}

fn optional_date(field: &str, value: Option<&str>, today: NaiveDate) -> Option<NaiveDate> {
    let raw = value?;
    let parsed = normalize_date(raw, today);
    if parsed.is_none() {
        warn!(field, value = %raw, "dropping unparseable model date");
    }
    parsed
}

fn optional_time(field: &str, value: Option<&str>) -> Option<NaiveTime> {
    let raw = value?;
    let parsed = normalize_time(raw);
    if parsed.is_none() {
        warn!(field, value = %raw, "dropping unparseable model time");
    }
    parsed
}

/// Coerces a reminder written as an integer, a whole float or a numeric
/// string.
fn optional_reminder(value: &Value) -> Option<ReminderOffset> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_owned(),
        other => {
            warn!(value = %other, "dropping non-numeric model reminder");
            return None;
        }
    };
    let whole = text.split_once('.').map_or(Some(text.as_str()), |(digits, fraction)| {
        fraction.bytes().all(|digit| digit == b'0').then_some(digits)
    });
    let Some(minutes) = whole.and_then(|digits| digits.parse::<u32>().ok()) else {
        warn!(value = %value, "dropping non-numeric model reminder");
        return None;
    };
    ReminderOffset::new(minutes)
        .inspect_err(|err| warn!(%err, "dropping model reminder"))
        .ok()
}
