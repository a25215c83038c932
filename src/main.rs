//! Command-line front end for tasklane.
//!
//! Usage:
//!
//! ```text
//! tasklane [--config tasklane.toml] [--user alice] <subcommand>
//! ```
//!
//! Every subcommand except `transitions` talks to `PostgreSQL` using the
//! configured `database_url`. Records are printed to standard output as
//! pretty JSON; diagnostics go to standard error through `tracing`.

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use mockable::DefaultClock;
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tasklane::command::adapters::ConfiguredLanguageModel;
use tasklane::command::domain::normalize_time;
use tasklane::command::services::CommandInterpreter;
use tasklane::config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE};
use tasklane::storage::{self, PgPool, StorageError};
use tasklane::task::adapters::postgres::PostgresTaskRepository;
use tasklane::task::domain::{TaskId, TaskPriority, TaskState};
use tasklane::task::services::{
    CreateTaskRequest, ScheduleFields, TaskMutationError, TaskMutationService, UpdateTaskRequest,
};
use tasklane::telemetry;
use tasklane::user::adapters::postgres::PostgresUserRepository;
use tasklane::user::domain::UserId;
use tasklane::user::services::{RegisterUserRequest, UserAccountError, UserAccountService};
use thiserror::Error;
use uuid::Uuid;

type Tasks = TaskMutationService<PostgresTaskRepository, DefaultClock>;
type Accounts = UserAccountService<PostgresUserRepository, DefaultClock>;

#[derive(Parser)]
#[command(
    name = "tasklane",
    version,
    about = "Personal task tracking with natural-language commands"
)]
struct Cli {
    /// Configuration file; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Username whose tasks are read or changed.
    #[arg(long, global = true, env = "TASKLANE_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the users and tasks tables if they are missing.
    Migrate,
    /// Register a user with a pre-hashed credential.
    Register {
        /// Unique username.
        username: String,
        /// Credential hash produced by the authentication service.
        #[arg(long)]
        credential_hash: String,
    },
    /// Create a task in the 'Not Started' state.
    Create {
        /// Task title.
        title: String,
        #[command(flatten)]
        details: DetailArgs,
    },
    /// List tasks, optionally filtered by state.
    List {
        /// Only show tasks in this state.
        #[arg(long, value_parser = parse_state)]
        state: Option<TaskState>,
    },
    /// Update fields of a task; a state change must follow the transition table.
    Update {
        /// Task identifier.
        id: Uuid,
        /// Replacement title.
        #[arg(long)]
        title: Option<String>,
        /// Requested state.
        #[arg(long, value_parser = parse_state)]
        state: Option<TaskState>,
        #[command(flatten)]
        details: DetailArgs,
    },
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: Uuid,
    },
    /// Interpret and run a free-text command, e.g. "add a task to water plants".
    Command {
        /// Command text; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print the task state transition table.
    Transitions,
}

#[derive(Args)]
struct DetailArgs {
    /// Free-form description.
    #[arg(long)]
    description: Option<String>,
    /// Priority: low, medium, high or urgent.
    #[arg(long, value_parser = parse_priority)]
    priority: Option<TaskPriority>,
    /// Category label.
    #[arg(long)]
    category: Option<String>,
    /// Planned start date (YYYY-MM-DD).
    #[arg(long)]
    scheduled_date: Option<NaiveDate>,
    /// Planned start time, e.g. 09:30, 3pm or morning.
    #[arg(long, value_parser = parse_time)]
    scheduled_time: Option<NaiveTime>,
    /// Due date (YYYY-MM-DD).
    #[arg(long)]
    due_date: Option<NaiveDate>,
    /// Due time, e.g. 17:00, 5pm or evening.
    #[arg(long, value_parser = parse_time)]
    due_time: Option<NaiveTime>,
    /// Minutes before the due instant to remind.
    #[arg(long)]
    reminder_minutes: Option<u32>,
}

impl DetailArgs {
    const fn schedule(&self) -> ScheduleFields {
        ScheduleFields {
            scheduled_date: self.scheduled_date,
            scheduled_time: self.scheduled_time,
            due_date: self.due_date,
            due_time: self.due_time,
            reminder_minutes: self.reminder_minutes,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Account(#[from] UserAccountError),
    #[error(transparent)]
    Task(#[from] TaskMutationError),
    #[error("this command needs --user (or TASKLANE_USER)")]
    MissingUser,
    #[error("unknown user '{0}'")]
    UnknownUser(String),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[tokio::main]
async fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    telemetry::init(&config.log_filter);

    if matches!(cli.command, Command::Transitions) {
        emit(&transition_table())?;
        return Ok(ExitCode::SUCCESS);
    }

    let pool = storage::connect(&config.database_url, config.pool_size)?;
    let clock = Arc::new(DefaultClock);
    let tasks = TaskMutationService::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::clone(&clock),
    );
    let accounts = UserAccountService::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        clock,
    );
    let app = App {
        config,
        pool,
        tasks,
        accounts,
        user: cli.user,
    };
    app.run(cli.command).await
}

struct App {
    config: AppConfig,
    pool: PgPool,
    tasks: Tasks,
    accounts: Accounts,
    user: Option<String>,
}

impl App {
    async fn run(self, command: Command) -> Result<ExitCode, CliError> {
        match command {
            Command::Migrate => {
                let pool = self.pool.clone();
                tokio::task::spawn_blocking(move || storage::apply_schema(&pool)).await??;
                emit(&json!({ "migrated": true }))?;
            }
            Command::Register {
                username,
                credential_hash,
            } => {
                let user = self
                    .accounts
                    .register(RegisterUserRequest::new(username, credential_hash))
                    .await?;
                emit(&user)?;
            }
            Command::Create { title, details } => {
                let owner = self.owner().await?;
                let task = self.tasks.create(create_request(owner, title, details)).await?;
                emit(&task)?;
            }
            Command::List { state } => {
                let owner = self.owner().await?;
                emit(&self.tasks.list(owner, state).await?)?;
            }
            Command::Update {
                id,
                title,
                state,
                details,
            } => {
                let owner = self.owner().await?;
                let request = update_request(owner, TaskId::from_uuid(id), title, state, details);
                emit(&self.tasks.update(request).await?)?;
            }
            Command::Delete { id } => {
                let owner = self.owner().await?;
                self.tasks.delete(owner, TaskId::from_uuid(id)).await?;
                emit(&json!({ "deleted": id }))?;
            }
            Command::Command { text } => {
                let owner = self.owner().await?;
                let model = ConfiguredLanguageModel::from_config(&self.config.language_model);
                let interpreter = CommandInterpreter::new(self.tasks, Arc::new(model))
                    .with_timeout(self.config.language_model.timeout());
                let outcome = interpreter.execute(owner, &text.join(" ")).await;
                emit(&outcome)?;
                if !outcome.success() {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Transitions => emit(&transition_table())?,
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn owner(&self) -> Result<UserId, CliError> {
        let username = self.user.as_deref().ok_or(CliError::MissingUser)?;
        self.accounts
            .find_by_username(username)
            .await?
            .map(|user| user.id())
            .ok_or_else(|| CliError::UnknownUser(username.to_owned()))
    }
}

fn create_request(owner: UserId, title: String, details: DetailArgs) -> CreateTaskRequest {
    let mut request = CreateTaskRequest::new(owner, title).with_schedule(details.schedule());
    if let Some(priority) = details.priority {
        request = request.with_priority(priority);
    }
    if let Some(description) = details.description {
        request = request.with_description(description);
    }
    if let Some(category) = details.category {
        request = request.with_category(category);
    }
    request
}

fn update_request(
    owner: UserId,
    task_id: TaskId,
    title: Option<String>,
    state: Option<TaskState>,
    details: DetailArgs,
) -> UpdateTaskRequest {
    let mut request = UpdateTaskRequest::new(owner, task_id).with_schedule(details.schedule());
    if let Some(new_title) = title {
        request = request.with_title(new_title);
    }
    if let Some(target) = state {
        request = request.with_state(target);
    }
    if let Some(priority) = details.priority {
        request = request.with_priority(priority);
    }
    if let Some(description) = details.description {
        request = request.with_description(description);
    }
    if let Some(category) = details.category {
        request = request.with_category(category);
    }
    request
}

fn transition_table() -> serde_json::Value {
    TaskState::transition_table()
        .into_iter()
        .map(|(state, allowed)| {
            json!({
                "state": state,
                "label": state.label(),
                "allowed": allowed,
                "terminal": state.is_terminal(),
            })
        })
        .collect()
}

fn emit(value: &impl Serialize) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn parse_state(raw: &str) -> Result<TaskState, String> {
    TaskState::try_from(raw).map_err(|err| err.to_string())
}

fn parse_priority(raw: &str) -> Result<TaskPriority, String> {
    TaskPriority::try_from(raw).map_err(|err| err.to_string())
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    normalize_time(raw).ok_or_else(|| format!("unrecognised time '{raw}'"))
}
