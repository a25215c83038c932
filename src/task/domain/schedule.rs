//! Scheduling metadata attached to a task.
//!
//! Reminders are advisory: the crate computes when a reminder falls due and
//! leaves delivery to polling clients.

use super::TaskDomainError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Minutes before the due instant at which a reminder should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ReminderOffset(u32);

impl ReminderOffset {
    /// Largest supported offset (one week).
    pub const MAX_MINUTES: u32 = 7 * 24 * 60;

    /// Creates a validated reminder offset.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidReminderOffset`] when the value is
    /// zero or exceeds [`Self::MAX_MINUTES`].
    pub const fn new(minutes: u32) -> Result<Self, TaskDomainError> {
        if minutes == 0 || minutes > Self::MAX_MINUTES {
            return Err(TaskDomainError::InvalidReminderOffset(minutes));
        }
        Ok(Self(minutes))
    }

    /// Returns the offset in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ReminderOffset {
    type Error = TaskDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReminderOffset> for u32 {
    fn from(value: ReminderOffset) -> Self {
        value.0
    }
}

/// Optional planned start, due instant and reminder for a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSchedule {
    /// Planned start date.
    pub scheduled_date: Option<NaiveDate>,
    /// Planned start time of day.
    pub scheduled_time: Option<NaiveTime>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Due time of day.
    pub due_time: Option<NaiveTime>,
    /// Reminder offset before the due instant.
    pub reminder: Option<ReminderOffset>,
}

impl TaskSchedule {
    /// Returns an empty schedule.
    #[must_use]
    pub const fn unscheduled() -> Self {
        Self {
            scheduled_date: None,
            scheduled_time: None,
            due_date: None,
            due_time: None,
            reminder: None,
        }
    }

    /// Returns whether no scheduling field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.scheduled_date.is_none()
            && self.scheduled_time.is_none()
            && self.due_date.is_none()
            && self.due_time.is_none()
            && self.reminder.is_none()
    }

    /// Returns the due instant in local wall-clock time.
    ///
    /// A due date without a time is due at the start of that day.
    #[must_use]
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        let date = self.due_date?;
        Some(date.and_time(self.due_time.unwrap_or(NaiveTime::MIN)))
    }

    /// Returns the instant at which the reminder falls due.
    #[must_use]
    pub fn reminder_at(&self) -> Option<NaiveDateTime> {
        let due = self.due_at()?;
        let offset = self.reminder?;
        due.checked_sub_signed(TimeDelta::minutes(i64::from(offset.minutes())))
    }

    /// Returns whether a polling client should show the reminder at `now`.
    ///
    /// The window opens at [`Self::reminder_at`] and closes at the due
    /// instant.
    #[must_use]
    pub fn is_reminder_due(&self, now: NaiveDateTime) -> bool {
        match (self.reminder_at(), self.due_at()) {
            (Some(reminder), Some(due)) => reminder <= now && now < due,
            _ => false,
        }
    }
}
