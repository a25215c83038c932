//! Service layer through which every task write passes.

use crate::task::{
    domain::{
        ReminderOffset, Task, TaskChanges, TaskDomainError, TaskDraft, TaskId, TaskPriority,
        TaskSchedule, TaskState, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::UserId;
use chrono::{NaiveDate, NaiveTime};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner: UserId,
    title: String,
    description: Option<String>,
    priority: Option<TaskPriority>,
    category: Option<String>,
    schedule: ScheduleFields,
}

/// Raw scheduling fields shared by create and update requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleFields {
    /// Planned start date.
    pub scheduled_date: Option<NaiveDate>,
    /// Planned start time.
    pub scheduled_time: Option<NaiveTime>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Due time.
    pub due_time: Option<NaiveTime>,
    /// Reminder offset in minutes, validated on use.
    pub reminder_minutes: Option<u32>,
}

impl From<TaskSchedule> for ScheduleFields {
    fn from(schedule: TaskSchedule) -> Self {
        Self {
            scheduled_date: schedule.scheduled_date,
            scheduled_time: schedule.scheduled_time,
            due_date: schedule.due_date,
            due_time: schedule.due_time,
            reminder_minutes: schedule.reminder.map(ReminderOffset::minutes),
        }
    }
}

impl ScheduleFields {
    fn reminder(&self) -> Result<Option<ReminderOffset>, TaskDomainError> {
        self.reminder_minutes.map(ReminderOffset::new).transpose()
    }
}

impl CreateTaskRequest {
    /// Creates a request with the required owner and title.
    #[must_use]
    pub fn new(owner: UserId, title: impl Into<String>) -> Self {
        Self {
            owner,
            title: title.into(),
            description: None,
            priority: None,
            category: None,
            schedule: ScheduleFields::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the scheduling fields.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: ScheduleFields) -> Self {
        self.schedule = schedule;
        self
    }

    /// Returns the requesting owner.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    owner: UserId,
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
    state: Option<TaskState>,
    priority: Option<TaskPriority>,
    category: Option<String>,
    schedule: ScheduleFields,
}

impl UpdateTaskRequest {
    /// Creates an update request that changes nothing yet.
    #[must_use]
    pub fn new(owner: UserId, task_id: TaskId) -> Self {
        Self {
            owner,
            task_id,
            title: None,
            description: None,
            state: None,
            priority: None,
            category: None,
            schedule: ScheduleFields::default(),
        }
    }

    /// Requests a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Requests a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Requests a state transition.
    #[must_use]
    pub const fn with_state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }

    /// Requests a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Requests a new category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Requests new scheduling fields; unset fields are left unchanged.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: ScheduleFields) -> Self {
        self.schedule = schedule;
        self
    }

    /// Returns the target task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Service-level errors for task mutations and queries.
#[derive(Debug, Error)]
pub enum TaskMutationError {
    /// Domain validation failed: empty title, bad reminder or an illegal
    /// transition.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist or is not owned by the requester.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskMutationError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task mutation service operations.
pub type TaskMutationResult<T> = Result<T, TaskMutationError>;

/// The single component permitted to write task records.
pub struct TaskMutationService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskMutationService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskMutationService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task mutation service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the clock used to timestamp mutations.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Creates a task in [`TaskState::NotStarted`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Domain`] when the title is blank or the
    /// reminder offset is out of range, or [`TaskMutationError::Repository`]
    /// when persistence fails.
    #[instrument(skip_all, fields(owner = %request.owner))]
    pub async fn create(&self, request: CreateTaskRequest) -> TaskMutationResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let schedule = TaskSchedule {
            scheduled_date: request.schedule.scheduled_date,
            scheduled_time: request.schedule.scheduled_time,
            due_date: request.schedule.due_date,
            due_time: request.schedule.due_time,
            reminder: request.schedule.reminder()?,
        };

        let mut draft = TaskDraft::new(title)
            .with_priority(request.priority.unwrap_or_default())
            .with_schedule(schedule);
        if let Some(description) = request.description {
            draft = draft.with_description(description);
        }
        if let Some(category) = request.category {
            draft = draft.with_category(category);
        }

        let task = Task::new(request.owner, draft, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), title = %task.title(), "created task");
        Ok(task)
    }

    /// Returns one task owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`] when the task is missing or
    /// owned by someone else.
    pub async fn get(&self, owner: UserId, task_id: TaskId) -> TaskMutationResult<Task> {
        self.repository
            .find_by_id(owner, task_id)
            .await?
            .ok_or(TaskMutationError::NotFound(task_id))
    }

    /// Lists the owner's tasks, optionally filtered by state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Repository`] when the lookup fails.
    pub async fn list(
        &self,
        owner: UserId,
        state: Option<TaskState>,
    ) -> TaskMutationResult<Vec<Task>> {
        Ok(self.repository.list_for_owner(owner, state).await?)
    }

    /// Applies a partial update.
    ///
    /// A requested state change is checked against the transition table and
    /// the title rule is enforced before anything is written; a rejected
    /// request leaves the stored task unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`] for missing or foreign tasks
    /// and [`TaskMutationError::Domain`] for blank titles, bad reminders and
    /// illegal transitions.
    #[instrument(skip_all, fields(owner = %request.owner, task_id = %request.task_id))]
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskMutationResult<Task> {
        let changes = TaskChanges {
            title: request.title.map(TaskTitle::new).transpose()?,
            description: request.description,
            state: request.state,
            priority: request.priority,
            category: request.category,
            scheduled_date: request.schedule.scheduled_date,
            scheduled_time: request.schedule.scheduled_time,
            due_date: request.schedule.due_date,
            due_time: request.schedule.due_time,
            reminder: request.schedule.reminder()?,
        };

        let mut task = self.get(request.owner, request.task_id).await?;
        let previous_state = task.state();
        if let Err(err) = task.apply(changes, &*self.clock) {
            warn!(error = %err, "rejected task update");
            return Err(err.into());
        }
        self.repository.update(&task).await?;
        info!(from = %previous_state, to = %task.state(), "updated task");
        Ok(task)
    }

    /// Moves a task to `target` through the transition table.
    ///
    /// # Errors
    ///
    /// See [`Self::update`].
    pub async fn transition(
        &self,
        owner: UserId,
        task_id: TaskId,
        target: TaskState,
    ) -> TaskMutationResult<Task> {
        self.update(UpdateTaskRequest::new(owner, task_id).with_state(target))
            .await
    }

    /// Deletes a task owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`] when the task is already gone
    /// or owned by someone else.
    #[instrument(skip(self))]
    pub async fn delete(&self, owner: UserId, task_id: TaskId) -> TaskMutationResult<()> {
        self.repository.delete(owner, task_id).await?;
        info!("deleted task");
        Ok(())
    }
}
