//! Application services for task management.

mod mutation;

pub use mutation::{
    CreateTaskRequest, ScheduleFields, TaskMutationError, TaskMutationResult,
    TaskMutationService, UpdateTaskRequest,
};
