//! Given steps for command BDD scenarios.

use super::world::{CommandWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;
use tasklane::task::{domain::TaskState, services::CreateTaskRequest};

#[given("the language model is unavailable")]
fn model_unavailable(world: &mut CommandWorld) {
    world.model_replies.clear();
}

#[given(r#"the language model replies "{reply}""#)]
fn model_replies(world: &mut CommandWorld, reply: String) {
    world.model_replies.push(reply);
}

#[given(r#"the language model proposes creating "{title}""#)]
fn model_proposes_create(world: &mut CommandWorld, title: String) {
    world
        .model_replies
        .push(json!({ "action": "create", "task_title": title }).to_string());
}

#[given(r#"a task titled "{title}" in state "{state}""#)]
fn seeded_task(world: &mut CommandWorld, title: String, state: String) -> Result<(), eyre::Report> {
    let target = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid state in scenario: {err}"))?;
    let mut task = run_async(
        world
            .service
            .create(CreateTaskRequest::new(world.owner, title)),
    )
    .wrap_err("seed task")?;
    while task.state() != target {
        let next = task
            .state()
            .next()
            .ok_or_else(|| eyre::eyre!("state {target} is not reachable"))?;
        task = run_async(world.service.transition(world.owner, task.id(), next))
            .wrap_err("advance seeded task")?;
    }
    Ok(())
}
