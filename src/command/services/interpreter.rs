//! Command interpreter: classifies free text and executes it through the
//! task mutation service.

use super::prompt::{PromptError, render_prompt};
use crate::command::{
    domain::{
        CommandAction, CommandFailure, CommandIntent, CommandOutcome, CreateIntent, IntentSource,
        InterpretedCommand, ModelResponseError, TitleMatch, decode_model_response, match_title,
        parse_fallback,
    },
    ports::{LanguageModel, LanguageModelError},
};
use crate::task::{
    domain::{IllegalTransition, Task, TaskDomainError, TaskPriority, TaskState},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskMutationError, TaskMutationService},
};
use crate::user::domain::UserId;
use chrono::{NaiveDate, NaiveTime};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// How long the interpreter waits for the model before falling back.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
enum ModelFailure {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("language model timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Model(#[from] LanguageModelError),
    #[error(transparent)]
    Response(#[from] ModelResponseError),
}

/// Maps free text to intents and runs them.
///
/// The interpreter never writes task state itself; every change goes
/// through [`TaskMutationService`], so commands obey the same transition
/// rules as direct updates.
pub struct CommandInterpreter<R, C, M>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    M: LanguageModel,
{
    tasks: TaskMutationService<R, C>,
    model: Arc<M>,
    timeout: Duration,
}

impl<R, C, M> CommandInterpreter<R, C, M>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    M: LanguageModel,
{
    /// Creates an interpreter with the default model timeout.
    #[must_use]
    pub const fn new(tasks: TaskMutationService<R, C>, model: Arc<M>) -> Self {
        Self {
            tasks,
            model,
            timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    /// Overrides the model timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Classifies `input` into an intent.
    ///
    /// The model is tried first. When it is disabled, fails, times out or
    /// answers with anything that does not decode into a complete intent,
    /// the fallback parser classifies the input instead.
    pub async fn interpret(&self, input: &str) -> InterpretedCommand {
        let today = self.tasks.clock().local().date_naive();
        match self.classify_with_model(input, today).await {
            Ok(intent) => InterpretedCommand {
                intent,
                source: IntentSource::Model,
            },
            Err(ModelFailure::Model(LanguageModelError::Disabled)) => {
                debug!("language model disabled; using fallback parser");
                fallback(input, today)
            }
            Err(err) => {
                warn!(error = %err, "language model unusable; using fallback parser");
                fallback(input, today)
            }
        }
    }

    /// Interprets and executes `input` on behalf of `owner`.
    #[instrument(skip_all, fields(%owner))]
    pub async fn execute(&self, owner: UserId, input: &str) -> CommandOutcome {
        let interpreted = self.interpret(input).await;
        info!(source = ?interpreted.source, "classified command");
        self.dispatch(owner, interpreted.intent, input).await
    }

    /// Executes an already classified intent.
    ///
    /// `input` is only used to describe unrecognised commands.
    pub async fn dispatch(
        &self,
        owner: UserId,
        intent: CommandIntent,
        input: &str,
    ) -> CommandOutcome {
        let (action, result) = match intent {
            CommandIntent::Create(create) => {
                (CommandAction::Create, self.create(owner, create).await)
            }
            CommandIntent::AdvanceState { title_fragment } => (
                CommandAction::AdvanceState,
                self.advance(owner, &title_fragment).await,
            ),
            CommandIntent::Complete { title_fragment } => (
                CommandAction::Complete,
                self.complete(owner, &title_fragment).await,
            ),
            CommandIntent::SetState {
                title_fragment,
                state,
            } => (
                CommandAction::SetState,
                self.set_state(owner, &title_fragment, state).await,
            ),
            CommandIntent::ListByState { state } => {
                (CommandAction::List, self.list(owner, state).await)
            }
            CommandIntent::Delete { title_fragment } => (
                CommandAction::Delete,
                self.delete(owner, &title_fragment).await,
            ),
            CommandIntent::Unrecognized => {
                return CommandOutcome::failed(
                    None,
                    CommandFailure::Unrecognized {
                        input: input.trim().to_owned(),
                    },
                );
            }
        };
        result.unwrap_or_else(|failure| {
            info!(%failure, "command not applied");
            CommandOutcome::failed(Some(action), failure)
        })
    }

    async fn classify_with_model(
        &self,
        input: &str,
        today: NaiveDate,
    ) -> Result<CommandIntent, ModelFailure> {
        let prompt = render_prompt(input, today)?;
        let reply = tokio::time::timeout(self.timeout, self.model.complete(&prompt))
            .await
            .map_err(|_| ModelFailure::Timeout(self.timeout))??;
        Ok(decode_model_response(&reply, today)?)
    }

    async fn create(
        &self,
        owner: UserId,
        intent: CreateIntent,
    ) -> Result<CommandOutcome, CommandFailure> {
        let CreateIntent {
            title,
            description,
            priority,
            category,
            schedule,
        } = intent;
        let requested_title = title.clone();
        let mut request = CreateTaskRequest::new(owner, title).with_schedule(schedule.into());
        if let Some(text) = description {
            request = request.with_description(text);
        }
        if let Some(level) = priority {
            request = request.with_priority(level);
        }
        if let Some(name) = category {
            request = request.with_category(name);
        }

        let task = self
            .tasks
            .create(request)
            .await
            .map_err(|err| mutation_failure(err, &requested_title))?;
        Ok(CommandOutcome::succeeded(CommandAction::Create, describe_created(&task))
            .with_task_id(task.id()))
    }

    async fn advance(
        &self,
        owner: UserId,
        fragment: &str,
    ) -> Result<CommandOutcome, CommandFailure> {
        let task = self.resolve(owner, fragment).await?;
        let current = task.state();
        let Some(next) = current.next() else {
            return Err(CommandFailure::IllegalTransition {
                title: task.title().as_str().to_owned(),
                transition: IllegalTransition {
                    from: current,
                    to: current,
                },
            });
        };
        self.move_task(CommandAction::AdvanceState, owner, &task, next)
            .await
    }

    async fn complete(
        &self,
        owner: UserId,
        fragment: &str,
    ) -> Result<CommandOutcome, CommandFailure> {
        let task = self.resolve(owner, fragment).await?;
        self.move_task(CommandAction::Complete, owner, &task, TaskState::Completed)
            .await
    }

    async fn set_state(
        &self,
        owner: UserId,
        fragment: &str,
        target: TaskState,
    ) -> Result<CommandOutcome, CommandFailure> {
        let task = self.resolve(owner, fragment).await?;
        self.move_task(CommandAction::SetState, owner, &task, target)
            .await
    }

    async fn list(
        &self,
        owner: UserId,
        state: Option<TaskState>,
    ) -> Result<CommandOutcome, CommandFailure> {
        let tasks = self
            .tasks
            .list(owner, state)
            .await
            .map_err(|err| mutation_failure(err, ""))?;
        let filter = state
            .map(|wanted| format!(" in state '{wanted}'"))
            .unwrap_or_default();
        let message = if tasks.is_empty() {
            format!("No tasks found{filter}")
        } else {
            format!("Found {} task(s){filter}", tasks.len())
        };
        Ok(CommandOutcome::succeeded(CommandAction::List, message).with_tasks(tasks))
    }

    async fn delete(
        &self,
        owner: UserId,
        fragment: &str,
    ) -> Result<CommandOutcome, CommandFailure> {
        let task = self.resolve(owner, fragment).await?;
        let title = task.title().as_str();
        self.tasks
            .delete(owner, task.id())
            .await
            .map_err(|err| mutation_failure(err, title))?;
        Ok(
            CommandOutcome::succeeded(CommandAction::Delete, format!("Deleted task '{title}'"))
                .with_task_id(task.id()),
        )
    }

    async fn move_task(
        &self,
        action: CommandAction,
        owner: UserId,
        task: &Task,
        target: TaskState,
    ) -> Result<CommandOutcome, CommandFailure> {
        let updated = self
            .tasks
            .transition(owner, task.id(), target)
            .await
            .map_err(|err| mutation_failure(err, task.title().as_str()))?;
        let message = format!("Updated '{}' to '{}'", updated.title(), updated.state());
        Ok(CommandOutcome::succeeded(action, message).with_task_id(updated.id()))
    }

    async fn resolve(&self, owner: UserId, fragment: &str) -> Result<Task, CommandFailure> {
        let tasks = self
            .tasks
            .list(owner, None)
            .await
            .map_err(|err| mutation_failure(err, fragment))?;
        match match_title(&tasks, fragment) {
            TitleMatch::None => Err(CommandFailure::TaskNotFound {
                fragment: fragment.to_owned(),
            }),
            TitleMatch::One(task) => Ok(task.clone()),
            TitleMatch::Many(candidates) => Err(CommandFailure::AmbiguousMatch {
                fragment: fragment.to_owned(),
                candidates: candidates
                    .iter()
                    .map(|task| task.title().as_str().to_owned())
                    .collect(),
            }),
        }
    }
}

fn fallback(input: &str, today: NaiveDate) -> InterpretedCommand {
    InterpretedCommand {
        intent: parse_fallback(input, today),
        source: IntentSource::Fallback,
    }
}

fn mutation_failure(err: TaskMutationError, title: &str) -> CommandFailure {
    match err {
        TaskMutationError::Domain(TaskDomainError::IllegalTransition { transition, .. }) => {
            CommandFailure::IllegalTransition {
                title: title.to_owned(),
                transition,
            }
        }
        TaskMutationError::Domain(domain) => CommandFailure::Validation {
            reason: domain.to_string(),
        },
        TaskMutationError::NotFound(_) => CommandFailure::TaskNotFound {
            fragment: title.to_owned(),
        },
        TaskMutationError::Repository(repository) => CommandFailure::Storage {
            reason: repository.to_string(),
        },
    }
}

fn describe_created(task: &Task) -> String {
    let mut parts = vec![format!("Created task '{}'", task.title())];
    let schedule = task.schedule();
    if let Some(date) = schedule.scheduled_date {
        parts.push(with_time(&format!("scheduled for {date}"), schedule.scheduled_time));
    }
    if let Some(date) = schedule.due_date {
        parts.push(with_time(&format!("due {date}"), schedule.due_time));
    }
    if task.priority() != TaskPriority::Medium {
        parts.push(format!("priority {}", task.priority()));
    }
    if let Some(reminder) = schedule.reminder {
        parts.push(format!("reminder {} minutes before due", reminder.minutes()));
    }
    parts.join("; ")
}

fn with_time(base: &str, time: Option<NaiveTime>) -> String {
    time.map_or_else(
        || base.to_owned(),
        |at| format!("{base} at {}", at.format("%H:%M")),
    )
}
