//! Port contracts for command interpretation.

pub mod language_model;

pub use language_model::{LanguageModel, LanguageModelError};

#[cfg(test)]
pub use language_model::MockLanguageModel;
