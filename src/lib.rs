//! Tasklane: personal task tracking with natural-language commands.
//!
//! Tasks belong to a user and move through a three-state lifecycle guarded
//! by a single transition table. Free-text commands are classified by an
//! external language model when one is configured, and by a deterministic
//! pattern parser otherwise; either way the resulting intent is executed
//! through the same mutation service as direct edits.
//!
//! # Architecture
//!
//! Each bounded module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, `PostgreSQL`,
//!   subprocess)
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`task`]: Task aggregate, state machine and mutation service
//! - [`user`]: Accounts that own tasks
//! - [`command`]: Natural-language command interpretation
//! - [`storage`]: Shared `PostgreSQL` pool and schema bootstrap
//! - [`config`]: TOML configuration with environment overrides
//! - [`telemetry`]: Tracing subscriber set-up

pub mod command;
pub mod config;
pub mod storage;
pub mod task;
pub mod telemetry;
pub mod user;
