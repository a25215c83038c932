//! Behaviour tests for natural-language task commands.

#[path = "task_command_steps/mod.rs"]
mod task_command_steps_defs;

use rstest_bdd_macros::scenario;
use task_command_steps_defs::world::{CommandWorld, world};

#[scenario(
    path = "tests/features/task_commands.feature",
    name = "Add a task from free text"
)]
#[tokio::test(flavor = "multi_thread")]
async fn add_task_from_free_text(world: CommandWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_commands.feature",
    name = "Ambiguous completion changes nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn ambiguous_completion(world: CommandWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_commands.feature",
    name = "Completing a finished task is an illegal transition"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completing_finished_task(world: CommandWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_commands.feature",
    name = "Unrecognised text is reported"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unrecognised_text(world: CommandWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_commands.feature",
    name = "Unusable model output falls back to the pattern parser"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unusable_model_output(world: CommandWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_commands.feature",
    name = "A usable model answer is followed"
)]
#[tokio::test(flavor = "multi_thread")]
async fn usable_model_answer(world: CommandWorld) {
    let _ = world;
}
