//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskState},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_sequence: u64,
}

/// A task together with the order in which it was first stored.
#[derive(Debug)]
struct StoredTask {
    sequence: u64,
    task: Task,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn owned_by(task: &Task, owner: UserId) -> bool {
    task.owner() == owner
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.tasks.insert(
            task.id(),
            StoredTask {
                sequence,
                task: task.clone(),
            },
        );
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let existing = state
            .tasks
            .get_mut(&task.id())
            .filter(|existing| owned_by(&existing.task, task.owner()))
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        existing.task = task.clone();
        Ok(())
    }

    async fn delete(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let is_owned = state
            .tasks
            .get(&id)
            .is_some_and(|stored| owned_by(&stored.task, owner));
        if !is_owned {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.tasks.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .tasks
            .get(&id)
            .map(|stored| &stored.task)
            .filter(|task| owned_by(task, owner))
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        filter: Option<TaskState>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut matching: Vec<&StoredTask> = state
            .tasks
            .values()
            .filter(|stored| owned_by(&stored.task, owner))
            .filter(|stored| filter.is_none_or(|wanted| stored.task.state() == wanted))
            .collect();
        matching.sort_by_key(|stored| (stored.task.created_at(), stored.sequence));
        Ok(matching.into_iter().map(|stored| stored.task.clone()).collect())
    }
}
