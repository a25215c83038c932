//! When steps for command BDD scenarios.

use super::world::{CommandWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the user says "{text}""#)]
fn user_says(world: &mut CommandWorld, text: String) {
    let interpreter = world.interpreter();
    let outcome = run_async(interpreter.execute(world.owner, &text));
    world.outcome = Some(outcome);
}
