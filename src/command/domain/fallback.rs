//! Deterministic pattern parser used when the language model is unavailable
//! or its answer is unusable.

use super::{
    CommandIntent, CreateIntent,
    temporal::{normalize_time, parse_clock_time},
};
use crate::task::domain::{ReminderOffset, TaskPriority, TaskSchedule, TaskState};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use regex::Regex;
use std::sync::LazyLock;

const DEFAULT_REMINDER_MINUTES: u32 = 15;

#[expect(
    clippy::expect_used,
    reason = "patterns are string literals exercised by the parser tests"
)]
fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("fallback pattern should compile")
}

static CREATE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)^(?:please\s+)?(?:add|create|new|make|schedule|plan|remind me to)\s+(?:(?:a|an)\s+)?(?:new\s+)?(?:(?:urgent|important|high[- ]priority|low[- ]priority)\s+)?(?:(?:task|todo|to-do)\s*:?\s+)?(?:(?:to|called|named|for)\s+)?(?P<title>.+)$",
    )
});
static MARK_DONE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)^(?:please\s+)?mark\s+(?P<title>.+?)\s+as\s+(?:done|complete|completed|finished)$",
    )
});
static MARK_DONE_LEADING: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)^(?:please\s+)?mark\s+(?:as\s+)?(?:done|complete|completed|finished)\s*:?\s+(?P<title>.+)$",
    )
});
static COMPLETE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)^(?:please\s+)?(?:complete|finish|finished|close|done with|done)\s+(?P<title>.+)$")
});
static ADVANCE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)^(?:please\s+)?(?:start working on|start work on|i(?:'m| am) working on|working on|work on|start|begin)\s+(?P<title>.+)$",
    )
});
static DELETE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)^(?:please\s+)?(?:delete|remove|drop|cancel)\s+(?P<title>.+)$")
});
static LIST: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)^(?:please\s+)?(?:show|list|view|display|see|what(?:'s| is| are))\b")
});

static NOT_STARTED_FILTER: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\b(?:not[- ]started|pending|todo|to-do|open)\b"));
static IN_PROGRESS_FILTER: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\b(?:in[- ]progress|started|active|ongoing)\b"));
static COMPLETED_FILTER: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\b(?:completed|done|finished)\b"));

static FRAGMENT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)^(?:(?:the|my|a|an|this)\s+)+"));
static FRAGMENT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(?:^|\s+)(?:task|tasks|todo|item)$"));

static TRAILING_SCHEDULE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)(?:^|\s+)(?:(?:due|by|on|at)\s+)?(?P<phrase>today|tomorrow|tonight|(?:this|in\s+the)\s+(?:morning|afternoon|evening)|\d{1,2}(?::\d{2})?\s*(?:am|pm)|\d{1,2}:\d{2}|noon|asap|immediately|urgently)$",
    )
});
static REMIND: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\bremind me\b"));

static URGENT: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\b(?:urgent|urgently|asap|immediately)\b"));
static HIGH: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\b(?:important|high[- ]priority)\b"));
static LOW: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\b(?:low[- ]priority|minor)\b"));

/// Classifies `input` with fixed phrasings.
///
/// Recognised forms include "add a task to ...", "start ...", "complete ...",
/// "mark ... as done", "show my tasks" and "delete ...". Create commands also
/// pick up priority adjectives before the title, and `today`/`tomorrow`,
/// clock times and urgency words trailing it. Words inside the title itself
/// are left alone. Anything else is [`CommandIntent::Unrecognized`].
#[must_use]
pub fn parse_fallback(input: &str, today: NaiveDate) -> CommandIntent {
    let text = input.trim().trim_end_matches(['.', '!', '?']).trim_end();

    if let Some(title) = CREATE.captures(text).and_then(|create| create.name("title")) {
        let prefix = text.get(..title.start()).unwrap_or_default();
        return parse_create(prefix, title.as_str(), today);
    }
    if let Some(fragment) = capture_title(&MARK_DONE, text)
        .or_else(|| capture_title(&MARK_DONE_LEADING, text))
        .or_else(|| capture_title(&COMPLETE, text))
    {
        return fragment_intent(fragment, |title_fragment| CommandIntent::Complete {
            title_fragment,
        });
    }
    if let Some(fragment) = capture_title(&ADVANCE, text) {
        return fragment_intent(fragment, |title_fragment| CommandIntent::AdvanceState {
            title_fragment,
        });
    }
    if let Some(fragment) = capture_title(&DELETE, text) {
        return fragment_intent(fragment, |title_fragment| CommandIntent::Delete {
            title_fragment,
        });
    }
    if LIST.is_match(text) {
        return CommandIntent::ListByState {
            state: state_filter(text),
        };
    }
    CommandIntent::Unrecognized
}

fn capture_title<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .and_then(|captures| captures.name("title"))
        .map(|title| title.as_str().trim())
        .filter(|title| !title.is_empty())
}

fn fragment_intent(raw: &str, build: impl FnOnce(String) -> CommandIntent) -> CommandIntent {
    let without_prefix = FRAGMENT_PREFIX.replace(raw, "");
    let fragment = FRAGMENT_SUFFIX.replace(without_prefix.trim(), "");
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return CommandIntent::Unrecognized;
    }
    build(trimmed.to_owned())
}

fn state_filter(text: &str) -> Option<TaskState> {
    if NOT_STARTED_FILTER.is_match(text) {
        Some(TaskState::NotStarted)
    } else if IN_PROGRESS_FILTER.is_match(text) {
        Some(TaskState::InProgress)
    } else if COMPLETED_FILTER.is_match(text) {
        Some(TaskState::Completed)
    } else {
        None
    }
}

fn parse_create(prefix: &str, raw_title: &str, today: NaiveDate) -> CommandIntent {
    let (bare_title, phrases) = split_trailing_schedule(raw_title);
    let title = bare_title.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        return CommandIntent::Unrecognized;
    }

    let due_date = phrases
        .iter()
        .find_map(|phrase| match phrase.to_ascii_lowercase().as_str() {
            "tomorrow" => today.checked_add_signed(TimeDelta::days(1)),
            "today" | "tonight" => Some(today),
            _ => None,
        });
    let due_time = phrases.iter().find_map(|phrase| phrase_time(phrase));
    let reminder = (REMIND.is_match(prefix) && due_date.is_some())
        .then(|| ReminderOffset::new(DEFAULT_REMINDER_MINUTES).ok())
        .flatten();
    let priority =
        priority_hint(prefix).or_else(|| phrases.iter().find_map(|phrase| priority_hint(phrase)));

    CommandIntent::Create(CreateIntent {
        title,
        description: None,
        priority,
        category: None,
        schedule: TaskSchedule {
            due_date,
            due_time,
            reminder,
            ..TaskSchedule::unscheduled()
        },
    })
}

/// Peels schedule and urgency phrases off the end of a title.
///
/// Phrases are returned last-first.
fn split_trailing_schedule(raw_title: &str) -> (&str, Vec<&str>) {
    let mut title = raw_title.trim_end();
    let mut phrases = Vec::new();
    while let Some(captures) = TRAILING_SCHEDULE.captures(title) {
        let (Some(whole), Some(phrase)) = (captures.get(0), captures.name("phrase")) else {
            break;
        };
        phrases.push(phrase.as_str());
        title = title.get(..whole.start()).unwrap_or_default().trim_end();
    }
    (title, phrases)
}

fn phrase_time(phrase: &str) -> Option<NaiveTime> {
    parse_clock_time(phrase).or_else(|| {
        phrase
            .split_whitespace()
            .next_back()
            .and_then(normalize_time)
    })
}

fn priority_hint(text: &str) -> Option<TaskPriority> {
    if URGENT.is_match(text) {
        Some(TaskPriority::Urgent)
    } else if HIGH.is_match(text) {
        Some(TaskPriority::High)
    } else if LOW.is_match(text) {
        Some(TaskPriority::Low)
    } else {
        None
    }
}
