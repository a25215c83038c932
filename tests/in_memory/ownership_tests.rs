//! Owner scoping across registered users.

use super::helpers::{TestAccounts, TestTasks, accounts, register, tasks};
use rstest::rstest;
use tasklane::task::{
    domain::TaskState,
    services::{CreateTaskRequest, TaskMutationError, UpdateTaskRequest},
};
use tasklane::user::{ports::UserRepositoryError, services::UserAccountError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_only_see_their_own_tasks(
    tasks: TestTasks,
    accounts: TestAccounts,
) -> Result<(), eyre::Report> {
    let alice = register(&accounts, "alice").await?;
    let bob = register(&accounts, "bob").await?;
    let mine = tasks.create(CreateTaskRequest::new(alice, "Alice's task")).await?;
    tasks.create(CreateTaskRequest::new(bob, "Bob's task")).await?;

    assert_eq!(tasks.list(alice, None).await?, vec![mine]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_tasks_cannot_be_changed(
    tasks: TestTasks,
    accounts: TestAccounts,
) -> Result<(), eyre::Report> {
    let alice = register(&accounts, "alice").await?;
    let bob = register(&accounts, "bob").await?;
    let task = tasks.create(CreateTaskRequest::new(alice, "Private")).await?;

    let update = tasks
        .update(UpdateTaskRequest::new(bob, task.id()).with_state(TaskState::InProgress))
        .await;
    let delete = tasks.delete(bob, task.id()).await;

    assert!(matches!(update, Err(TaskMutationError::NotFound(_))));
    assert!(matches!(delete, Err(TaskMutationError::NotFound(_))));
    assert_eq!(tasks.list(alice, None).await?, vec![task]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn usernames_are_unique(accounts: TestAccounts) -> Result<(), eyre::Report> {
    register(&accounts, "carol").await?;

    let duplicate = register(&accounts, "carol").await;

    let err = duplicate.err().ok_or_else(|| eyre::eyre!("duplicate accepted"))?;
    assert!(matches!(
        err.downcast_ref::<UserAccountError>(),
        Some(UserAccountError::Repository(UserRepositoryError::DuplicateUsername(_)))
    ));
    Ok(())
}
