//! Shared `PostgreSQL` connection pooling and schema bootstrap.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;
use tracing::info;

/// `PostgreSQL` connection pool type shared by the task and user adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema for users and tasks; every statement is idempotent.
pub const SCHEMA_SQL: &str =
    include_str!("../migrations/2026-01-20-000000_create_users_and_tasks/up.sql");

/// Errors raised while connecting to or preparing the database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] PoolError),

    /// A pooled connection could not be checked out.
    #[error("failed to acquire database connection: {0}")]
    Connection(#[source] PoolError),

    /// Applying the schema failed.
    #[error("failed to apply schema: {0}")]
    Schema(#[source] diesel::result::Error),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`StorageError::Pool`] when the pool cannot establish its initial
/// connections.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, StorageError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(StorageError::Pool)
}

/// Creates the user and task tables when they do not yet exist.
///
/// This is a blocking call.
///
/// # Errors
///
/// Returns [`StorageError`] when no connection is available or a statement
/// fails.
pub fn apply_schema(pool: &PgPool) -> Result<(), StorageError> {
    let mut connection = pool.get().map_err(StorageError::Connection)?;
    connection
        .batch_execute(SCHEMA_SQL)
        .map_err(StorageError::Schema)?;
    info!("database schema is up to date");
    Ok(())
}
