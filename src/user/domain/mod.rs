//! Domain model for user accounts.

mod error;
mod user;

pub use error::UserDomainError;
pub use user::{CredentialHash, PersistedUserData, User, UserId, Username};
