//! Error types for user account validation.

use thiserror::Error;

/// Errors returned while constructing user account values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the storage limit.
    #[error("username is {0} characters long, expected at most {max}", max = super::Username::MAX_LENGTH)]
    UsernameTooLong(usize),

    /// The credential hash is empty.
    #[error("credential hash must not be empty")]
    EmptyCredentialHash,
}
