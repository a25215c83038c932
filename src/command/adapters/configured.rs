//! Runtime selection between the process adapter and the disabled one.

use super::{DisabledLanguageModel, ProcessLanguageModel};
use crate::command::ports::{LanguageModel, LanguageModelError};
use crate::config::LanguageModelConfig;
use async_trait::async_trait;

/// Language model chosen from configuration at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfiguredLanguageModel {
    /// Commands are sent to an external program.
    Process(ProcessLanguageModel),
    /// Only the fallback parser is used.
    Disabled(DisabledLanguageModel),
}

impl ConfiguredLanguageModel {
    /// Picks the adapter described by `config`.
    ///
    /// An enabled model without a command line is treated as disabled.
    #[must_use]
    pub fn from_config(config: &LanguageModelConfig) -> Self {
        config
            .enabled
            .then(|| ProcessLanguageModel::from_command_line(&config.command))
            .flatten()
            .map_or(Self::Disabled(DisabledLanguageModel), Self::Process)
    }
}

#[async_trait]
impl LanguageModel for ConfiguredLanguageModel {
    async fn complete(&self, prompt: &str) -> Result<String, LanguageModelError> {
        match self {
            Self::Process(model) => model.complete(prompt).await,
            Self::Disabled(model) => model.complete(prompt).await,
        }
    }
}
