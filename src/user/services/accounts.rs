//! Registration and lookup of user accounts.

use crate::user::{
    domain::{CredentialHash, User, UserDomainError, UserId, Username},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    username: String,
    credential_hash: String,
}

impl RegisterUserRequest {
    /// Creates a registration request.
    ///
    /// `credential_hash` must already be hashed by the authentication
    /// collaborator.
    #[must_use]
    pub fn new(username: impl Into<String>, credential_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            credential_hash: credential_hash.into(),
        }
    }
}

/// Service-level errors for user account operations.
#[derive(Debug, Error)]
pub enum UserAccountError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),

    /// No user exists with the given identifier.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user account service operations.
pub type UserAccountResult<T> = Result<T, UserAccountError>;

/// User registration and lookup service.
#[derive(Clone)]
pub struct UserAccountService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserAccountService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Domain`] for a blank or overlong username
    /// or empty hash, and [`UserAccountError::Repository`] when the username
    /// is already taken.
    #[instrument(skip_all)]
    pub async fn register(&self, request: RegisterUserRequest) -> UserAccountResult<User> {
        let RegisterUserRequest {
            username,
            credential_hash,
        } = request;
        let user = User::new(
            Username::new(username)?,
            CredentialHash::new(credential_hash)?,
            &*self.clock,
        );
        self.repository.store(&user).await?;
        info!(user_id = %user.id(), username = %user.username(), "registered user");
        Ok(user)
    }

    /// Returns the user with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] when no such user exists.
    pub async fn get(&self, id: UserId) -> UserAccountResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserAccountError::NotFound(id))
    }

    /// Looks a user up by username.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Domain`] when `username` is not a valid
    /// username, or [`UserAccountError::Repository`] on lookup failure.
    pub async fn find_by_username(&self, username: &str) -> UserAccountResult<Option<User>> {
        let lookup = Username::new(username)?;
        Ok(self.repository.find_by_username(&lookup).await?)
    }
}
