//! Adapter implementations of the language-model port.

pub mod configured;
pub mod memory;
pub mod process;

pub use configured::ConfiguredLanguageModel;
pub use memory::{DisabledLanguageModel, ScriptedLanguageModel};
pub use process::ProcessLanguageModel;
