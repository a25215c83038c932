//! Then steps for command BDD scenarios.

use super::world::CommandWorld;
use rstest_bdd_macros::then;
use tasklane::command::domain::CommandFailure;
use tasklane::task::domain::TaskState;

#[then("the command succeeds")]
fn command_succeeds(world: &CommandWorld) -> Result<(), eyre::Report> {
    let outcome = world.outcome()?;
    eyre::ensure!(outcome.success(), "command failed: {}", outcome.message());
    Ok(())
}

#[then("the command fails because the match is ambiguous")]
fn command_ambiguous(world: &CommandWorld) -> Result<(), eyre::Report> {
    let failure = world.outcome()?.failure();
    eyre::ensure!(
        matches!(failure, Some(CommandFailure::AmbiguousMatch { candidates, .. }) if candidates.len() == 2),
        "expected an ambiguous match over two tasks, got {failure:?}"
    );
    Ok(())
}

#[then("the command fails with an illegal transition")]
fn command_illegal(world: &CommandWorld) -> Result<(), eyre::Report> {
    let failure = world.outcome()?.failure();
    eyre::ensure!(
        matches!(failure, Some(CommandFailure::IllegalTransition { .. })),
        "expected an illegal transition, got {failure:?}"
    );
    Ok(())
}

#[then("the command fails as unrecognised")]
fn command_unrecognised(world: &CommandWorld) -> Result<(), eyre::Report> {
    let failure = world.outcome()?.failure();
    eyre::ensure!(
        matches!(failure, Some(CommandFailure::Unrecognized { .. })),
        "expected an unrecognised command, got {failure:?}"
    );
    Ok(())
}

#[then("the task count is {count:usize}")]
fn task_count(world: &CommandWorld, count: usize) -> Result<(), eyre::Report> {
    let found = world.tasks()?.len();
    eyre::ensure!(found == count, "expected {count} task(s), found {found}");
    Ok(())
}

#[then(r#"the task "{title}" is "{state}""#)]
fn task_is_in_state(world: &CommandWorld, title: String, state: String) -> Result<(), eyre::Report> {
    let expected = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid state in scenario: {err}"))?;
    let tasks = world.tasks()?;
    let task = tasks
        .iter()
        .find(|task| task.title().as_str() == title)
        .ok_or_else(|| eyre::eyre!("no task titled {title:?}"))?;
    eyre::ensure!(
        task.state() == expected,
        "expected {title:?} to be {expected}, found {}",
        task.state()
    );
    Ok(())
}
