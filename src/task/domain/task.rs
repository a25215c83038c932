//! Task aggregate root and its construction and change types.

use super::{
    ReminderOffset, TaskDomainError, TaskId, TaskPriority, TaskSchedule, TaskState, TaskTitle,
};
use crate::user::domain::UserId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: TaskTitle,
    description: Option<String>,
    state: TaskState,
    priority: TaskPriority,
    category: Option<String>,
    schedule: TaskSchedule,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a task.
///
/// Drafts carry no state; every task starts in [`TaskState::NotStarted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    category: Option<String>,
    schedule: TaskSchedule,
}

impl TaskDraft {
    /// Creates a draft with the required title.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            priority: TaskPriority::default(),
            category: None,
            schedule: TaskSchedule::unscheduled(),
        }
    }

    /// Sets the description; blank values are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_text(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the category; blank values are dropped.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_text(category.into());
        self
    }

    /// Sets the schedule.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: TaskSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Returns the draft title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }
}

/// Partial changes applied to an existing task.
///
/// `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Requested lifecycle state.
    pub state: Option<TaskState>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement category.
    pub category: Option<String>,
    /// Replacement scheduled date.
    pub scheduled_date: Option<NaiveDate>,
    /// Replacement scheduled time.
    pub scheduled_time: Option<NaiveTime>,
    /// Replacement due date.
    pub due_date: Option<NaiveDate>,
    /// Replacement due time.
    pub due_time: Option<NaiveTime>,
    /// Replacement reminder offset.
    pub reminder: Option<ReminderOffset>,
}

impl TaskChanges {
    /// Returns changes that only request a state transition.
    #[must_use]
    pub fn state_only(state: TaskState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted category.
    pub category: Option<String>,
    /// Persisted schedule.
    pub schedule: TaskSchedule,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task owned by `owner` in [`TaskState::NotStarted`].
    #[must_use]
    pub fn new(owner: UserId, draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner,
            title: draft.title,
            description: draft.description,
            state: TaskState::NotStarted,
            priority: draft.priority,
            category: draft.category,
            schedule: draft.schedule,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            state: data.state,
            priority: data.priority,
            category: data.category,
            schedule: data.schedule,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the schedule.
    #[must_use]
    pub const fn schedule(&self) -> &TaskSchedule {
        &self.schedule
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `target` when the transition table allows it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IllegalTransition`] and leaves the task
    /// untouched when the move is not permitted.
    pub fn transition_to(
        &mut self,
        target: TaskState,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.check_transition(target)?;
        self.state = target;
        self.touch(clock);
        Ok(())
    }

    /// Applies a set of changes as one unit.
    ///
    /// The state change, if any, is validated before any field is written, so
    /// a rejected request leaves the task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IllegalTransition`] when the requested state
    /// is not reachable from the current one.
    pub fn apply(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let TaskChanges {
            title,
            description,
            state,
            priority,
            category,
            scheduled_date,
            scheduled_time,
            due_date,
            due_time,
            reminder,
        } = changes;

        if let Some(target) = state {
            self.check_transition(target)?;
            self.state = target;
        }
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(text) = description {
            self.description = normalize_text(text);
        }
        if let Some(level) = priority {
            self.priority = level;
        }
        if let Some(name) = category {
            self.category = normalize_text(name);
        }

        let schedule = &mut self.schedule;
        schedule.scheduled_date = scheduled_date.or(schedule.scheduled_date);
        schedule.scheduled_time = scheduled_time.or(schedule.scheduled_time);
        schedule.due_date = due_date.or(schedule.due_date);
        schedule.due_time = due_time.or(schedule.due_time);
        schedule.reminder = reminder.or(schedule.reminder);

        self.touch(clock);
        Ok(())
    }

    fn check_transition(&self, target: TaskState) -> Result<(), TaskDomainError> {
        self.state
            .validate_transition(target)
            .map_err(|transition| TaskDomainError::IllegalTransition {
                task_id: self.id,
                transition,
            })
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
