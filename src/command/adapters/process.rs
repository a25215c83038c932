//! Language-model adapter that shells out to a configured command.

use crate::command::ports::{LanguageModel, LanguageModelError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Runs an external program per request: the prompt is written to its
/// standard input and its standard output is the reply.
///
/// The child is killed if the request future is dropped, so an interpreter
/// timeout never leaves a stray process behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessLanguageModel {
    program: String,
    args: Vec<String>,
}

impl ProcessLanguageModel {
    /// Creates an adapter for `program` invoked with `args`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Builds an adapter from a command line split into words.
    ///
    /// Returns `None` when `command` is empty.
    #[must_use]
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.iter().cloned()))
    }
}

#[async_trait]
impl LanguageModel for ProcessLanguageModel {
    #[instrument(skip_all, fields(program = %self.program))]
    async fn complete(&self, prompt: &str) -> Result<String, LanguageModelError> {
        debug!("spawning language model process");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            warn!(status = %output.status, "language model process failed");
            return Err(LanguageModelError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        debug!(bytes = output.stdout.len(), "language model replied");
        Ok(String::from_utf8(output.stdout)?)
    }
}
