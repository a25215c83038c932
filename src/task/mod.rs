//! Personal task management.
//!
//! Tasks move through a three-state lifecycle (`NotStarted`, `InProgress`,
//! `Completed`) governed by a single transition table. Every write goes
//! through [`services::TaskMutationService`], which consults that table
//! before persisting a state change. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
