//! In-memory integration tests for task lifecycle operations.

use super::helpers::{TestTasks, seed_task, tasks};
use chrono::{NaiveDate, NaiveTime};
use rstest::rstest;
use tasklane::task::{
    domain::{TaskDomainError, TaskPriority, TaskState},
    services::{CreateTaskRequest, ScheduleFields, TaskMutationError, UpdateTaskRequest},
};
use tasklane::user::domain::UserId;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_reaches_completed(tasks: TestTasks) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let created = tasks
        .create(CreateTaskRequest::new(owner, "File expenses").with_priority(TaskPriority::High))
        .await?;
    eyre::ensure!(created.state() == TaskState::NotStarted, "new task must be NotStarted");

    let started = tasks
        .transition(owner, created.id(), TaskState::InProgress)
        .await?;
    let finished = tasks
        .transition(owner, created.id(), TaskState::Completed)
        .await?;

    assert_eq!(started.state(), TaskState::InProgress);
    assert_eq!(finished.state(), TaskState::Completed);
    assert_eq!(finished.priority(), TaskPriority::High);
    assert_eq!(tasks.get(owner, created.id()).await?, finished);
    Ok(())
}

#[rstest]
#[case(TaskState::NotStarted, TaskState::Completed)]
#[case(TaskState::InProgress, TaskState::NotStarted)]
#[case(TaskState::Completed, TaskState::InProgress)]
#[case(TaskState::Completed, TaskState::NotStarted)]
#[tokio::test(flavor = "multi_thread")]
async fn illegal_moves_leave_the_stored_task_unchanged(
    tasks: TestTasks,
    #[case] from: TaskState,
    #[case] to: TaskState,
) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let seeded = seed_task(&tasks, owner, "Renew passport", from).await?;

    let result = tasks.transition(owner, seeded.id(), to).await;

    assert!(matches!(
        result,
        Err(TaskMutationError::Domain(TaskDomainError::IllegalTransition { .. }))
    ));
    assert_eq!(tasks.get(owner, seeded.id()).await?, seeded);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_update_keeps_untouched_fields(tasks: TestTasks) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let due_date = NaiveDate::from_ymd_opt(2026, 5, 1);
    let created = tasks
        .create(
            CreateTaskRequest::new(owner, "Pay rent")
                .with_category("Home")
                .with_schedule(ScheduleFields {
                    due_date,
                    ..ScheduleFields::default()
                }),
        )
        .await?;

    let updated = tasks
        .update(
            UpdateTaskRequest::new(owner, created.id())
                .with_description("Transfer before noon")
                .with_schedule(ScheduleFields {
                    due_time: NaiveTime::from_hms_opt(12, 0, 0),
                    reminder_minutes: Some(60),
                    ..ScheduleFields::default()
                }),
        )
        .await?;

    assert_eq!(updated.title().as_str(), "Pay rent");
    assert_eq!(updated.category(), Some("Home"));
    assert_eq!(updated.description(), Some("Transfer before noon"));
    assert_eq!(updated.schedule().due_date, due_date);
    assert_eq!(
        updated.schedule().reminder_at(),
        due_date.and_then(|date| date.and_hms_opt(11, 0, 0))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn title_and_state_change_together_or_not_at_all(
    tasks: TestTasks,
) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let created = tasks.create(CreateTaskRequest::new(owner, "Draft")).await?;

    let rejected = tasks
        .update(
            UpdateTaskRequest::new(owner, created.id())
                .with_title("Final")
                .with_state(TaskState::Completed),
        )
        .await;

    assert!(rejected.is_err());
    let stored = tasks.get(owner, created.id()).await?;
    assert_eq!(stored.title().as_str(), "Draft");
    assert_eq!(stored.state(), TaskState::NotStarted);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_tasks_disappear_from_listings(tasks: TestTasks) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let keep = tasks.create(CreateTaskRequest::new(owner, "Keep")).await?;
    let discard = tasks.create(CreateTaskRequest::new(owner, "Discard")).await?;

    tasks.delete(owner, discard.id()).await?;

    assert_eq!(tasks.list(owner, None).await?, vec![keep]);
    assert!(matches!(
        tasks.get(owner, discard.id()).await,
        Err(TaskMutationError::NotFound(id)) if id == discard.id()
    ));
    Ok(())
}
