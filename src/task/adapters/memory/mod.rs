//! In-memory adapter implementations for tests and embedded use.

mod task;

pub use task::InMemoryTaskRepository;
