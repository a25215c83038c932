//! Orchestration services for command interpretation.

mod interpreter;
mod prompt;

pub use interpreter::{CommandInterpreter, DEFAULT_MODEL_TIMEOUT};
pub use prompt::{PromptError, render_prompt};
