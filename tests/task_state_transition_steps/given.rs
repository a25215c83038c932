//! Given steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, parse_state, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasklane::task::services::CreateTaskRequest;

#[given(r#"a new task titled "{title}""#)]
fn new_task(world: &mut TaskTransitionWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .service
            .create(CreateTaskRequest::new(world.owner, title)),
    )
    .wrap_err("create task for transition scenario")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"the task has been moved to "{target}""#)]
fn task_has_been_moved(world: &mut TaskTransitionWorld, target: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let moved = run_async(
        world
            .service
            .transition(world.owner, task_id, parse_state(&target)?),
    )
    .wrap_err("transition task in scenario setup")?;
    world.task = Some(moved);
    Ok(())
}
