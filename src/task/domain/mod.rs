//! Domain model for personal task tracking.
//!
//! The task domain models task records, their scheduling metadata and the
//! lifecycle state machine while keeping all infrastructure concerns outside
//! of the domain boundary.

mod error;
mod ids;
mod priority;
mod schedule;
mod state;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStateError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use priority::TaskPriority;
pub use schedule::{ReminderOffset, TaskSchedule};
pub use state::{ALL_TASK_STATES, IllegalTransition, TaskState};
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft};
