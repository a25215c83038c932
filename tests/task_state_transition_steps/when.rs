//! When steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, parse_state, run_async};
use rstest_bdd_macros::when;
use tasklane::task::services::UpdateTaskRequest;

#[when(r#"the task is moved to "{target}""#)]
fn move_task(world: &mut TaskTransitionWorld, target: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(
        world
            .service
            .transition(world.owner, task_id, parse_state(&target)?),
    );
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the task title is changed to "{title}""#)]
fn change_title(world: &mut TaskTransitionWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(
        world
            .service
            .update(UpdateTaskRequest::new(world.owner, task_id).with_title(title)),
    );
    world.last_result = Some(result);
    Ok(())
}
