//! Natural-language command interpretation.
//!
//! Free text is classified into a [`domain::CommandIntent`], either by the
//! external language model or by the deterministic fallback parser, and then
//! executed through the task mutation service. The module follows the same
//! hexagonal layout as [`crate::task`]:
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
