//! `PostgreSQL` adapter for user accounts.

mod repository;
mod schema;

pub use repository::PostgresUserRepository;
