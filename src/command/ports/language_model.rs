//! Port for the external language-model collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Text-completion contract used to classify commands.
///
/// Implementations return the model's raw answer; decoding and validation
/// happen in the interpreter, which treats every response as untrusted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends `prompt` to the model and returns its raw reply.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageModelError`] when the model is disabled, cannot be
    /// reached or fails.
    async fn complete(&self, prompt: &str) -> Result<String, LanguageModelError>;
}

/// Errors returned by language-model adapters.
#[derive(Debug, Error)]
pub enum LanguageModelError {
    /// No model is configured.
    #[error("language model is disabled")]
    Disabled,

    /// The model process could not be started or talked to.
    #[error("language model I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The model process exited unsuccessfully.
    #[error("language model exited with status {status}: {stderr}")]
    Failed {
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The model replied with bytes that are not UTF-8.
    #[error("language model output is not UTF-8: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
}
