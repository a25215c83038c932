//! User accounts that own tasks.
//!
//! Credential verification happens outside this crate; the account records
//! only keep an opaque credential hash supplied by the authentication
//! collaborator, and services receive an already verified [`domain::UserId`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
