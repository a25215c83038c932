//! Then steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, parse_state, run_async};
use rstest_bdd_macros::then;
use tasklane::task::{domain::TaskDomainError, services::TaskMutationError};

#[then(r#"the task state is "{state}""#)]
fn task_state_is(world: &TaskTransitionWorld, state: String) -> Result<(), eyre::Report> {
    let expected = parse_state(&state)?;
    let stored = run_async(world.service.get(world.owner, world.task()?.id()))?;

    eyre::ensure!(
        stored.state() == expected,
        "expected state {expected}, found {}",
        stored.state()
    );
    Ok(())
}

#[then(r#"the task title is "{title}""#)]
fn task_title_is(world: &TaskTransitionWorld, title: String) -> Result<(), eyre::Report> {
    let stored = run_async(world.service.get(world.owner, world.task()?.id()))?;

    eyre::ensure!(
        stored.title().as_str() == title,
        "expected title {title:?}, found {:?}",
        stored.title().as_str()
    );
    Ok(())
}

#[then("the move is rejected as an illegal transition")]
fn move_rejected(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    let result = world.last_result()?;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskMutationError::Domain(
                TaskDomainError::IllegalTransition { .. }
            ))
        ),
        "expected IllegalTransition error, got {result:?}"
    );
    Ok(())
}

#[then("the update is rejected as a validation error")]
fn update_rejected(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    let result = world.last_result()?;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskMutationError::Domain(TaskDomainError::EmptyTitle))
        ),
        "expected EmptyTitle error, got {result:?}"
    );
    Ok(())
}
