//! In-process language-model adapters.

use crate::command::ports::{LanguageModel, LanguageModelError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Model adapter used when no model is configured.
///
/// Every call fails with [`LanguageModelError::Disabled`], so the
/// interpreter always uses its fallback parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisabledLanguageModel;

#[async_trait]
impl LanguageModel for DisabledLanguageModel {
    async fn complete(&self, _prompt: &str) -> Result<String, LanguageModelError> {
        Err(LanguageModelError::Disabled)
    }
}

/// Model adapter that replays canned replies in order.
///
/// Once the script is exhausted every call fails with
/// [`LanguageModelError::Disabled`]. Received prompts are recorded.
#[derive(Debug, Default)]
pub struct ScriptedLanguageModel {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLanguageModel {
    /// Creates a model that answers with `replies` in order.
    #[must_use]
    pub fn new(replies: impl IntoIterator<Item = String>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns every prompt received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLanguageModel {
    async fn complete(&self, prompt: &str) -> Result<String, LanguageModelError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_owned());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .ok_or(LanguageModelError::Disabled)
    }
}
