//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;

/// Row shape shared by task selects, inserts and full-row updates.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle state.
    pub state: String,
    /// Priority.
    pub priority: String,
    /// Optional category.
    pub category: Option<String>,
    /// Planned start date.
    pub scheduled_date: Option<NaiveDate>,
    /// Planned start time.
    pub scheduled_time: Option<NaiveTime>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Due time.
    pub due_time: Option<NaiveTime>,
    /// Reminder offset in minutes.
    pub reminder_minutes: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
