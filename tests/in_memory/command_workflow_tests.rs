//! Free-text commands executed against the in-memory store.

use super::helpers::{TestTasks, fallback_interpreter, seed_task, tasks};
use rstest::rstest;
use tasklane::command::domain::{CommandAction, CommandFailure};
use tasklane::task::domain::TaskState;
use tasklane::user::domain::UserId;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_task_can_be_driven_to_completion_by_commands(
    tasks: TestTasks,
) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let interpreter = fallback_interpreter(&tasks);

    let created = interpreter
        .execute(owner, "Add a task to prepare presentation")
        .await;
    let started = interpreter.execute(owner, "start the presentation task").await;
    let finished = interpreter
        .execute(owner, "complete the presentation task")
        .await;

    assert!(created.success(), "{}", created.message());
    assert_eq!(started.action(), Some(CommandAction::AdvanceState));
    assert!(finished.success(), "{}", finished.message());
    let stored = tasks.list(owner, None).await?;
    eyre::ensure!(stored.len() == 1, "expected one task, found {}", stored.len());
    assert!(
        stored
            .iter()
            .all(|task| task.state() == TaskState::Completed
                && task.title().as_str() == "prepare presentation")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commands_never_touch_other_owners(tasks: TestTasks) -> Result<(), eyre::Report> {
    let alice = UserId::new();
    let bob = UserId::new();
    let theirs = seed_task(&tasks, alice, "water plants", TaskState::NotStarted).await?;
    let interpreter = fallback_interpreter(&tasks);

    let outcome = interpreter.execute(bob, "delete the water plants task").await;

    assert!(matches!(
        outcome.failure(),
        Some(CommandFailure::TaskNotFound { .. })
    ));
    assert_eq!(tasks.list(alice, None).await?, vec![theirs]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_by_state_reports_only_matching_tasks(
    tasks: TestTasks,
) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    seed_task(&tasks, owner, "read book", TaskState::NotStarted).await?;
    let active = seed_task(&tasks, owner, "write report", TaskState::InProgress).await?;
    let interpreter = fallback_interpreter(&tasks);

    let outcome = interpreter.execute(owner, "show tasks in progress").await;

    assert!(outcome.success());
    assert_eq!(outcome.tasks(), std::slice::from_ref(&active));
    Ok(())
}
