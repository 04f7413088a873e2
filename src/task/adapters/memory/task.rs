//! In-memory task repository for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Children are returned in the order they were attached to their parent.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    children_index: HashMap<TaskId, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new task and indexes it under its parent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier is
    /// already stored.
    pub fn insert(&self, task: Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        if let Some(parent_id) = task.parent_id() {
            index_child(&mut state, parent_id, task.id());
        }
        state.tasks.insert(task.id(), task);
        Ok(())
    }

    /// Removes a task and returns it.
    ///
    /// Children of the removed task keep their (now dangling) parent
    /// reference, mirroring a document store without cascading deletes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub fn remove(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if let Some(parent_id) = task.parent_id() {
            unindex_child(&mut state, parent_id, id);
        }
        Ok(task)
    }

    /// Moves a task under a new parent, or detaches it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub fn set_parent(&self, id: TaskId, parent_id: Option<TaskId>) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous_parent = state
            .tasks
            .get(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?
            .parent_id();

        if let Some(old_parent) = previous_parent {
            unindex_child(&mut state, old_parent, id);
        }
        if let Some(new_parent) = parent_id {
            index_child(&mut state, new_parent, id);
        }
        if let Some(task) = state.tasks.get_mut(&id) {
            task.set_parent_id(parent_id);
        }
        Ok(())
    }
}

fn lock_error<T>(err: PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn index_child(state: &mut InMemoryTaskState, parent_id: TaskId, child_id: TaskId) {
    state
        .children_index
        .entry(parent_id)
        .or_default()
        .push(child_id);
}

/// Removes a child from its parent's index, cleaning up the entry if empty.
fn unindex_child(state: &mut InMemoryTaskState, parent_id: TaskId, child_id: TaskId) {
    if let Some(ids) = state.children_index.get_mut(&parent_id) {
        ids.retain(|id| *id != child_id);
        if ids.is_empty() {
            state.children_index.remove(&parent_id);
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_children(&self, parent_id: TaskId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let children = state
            .children_index
            .get(&parent_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(children)
    }

    async fn update_status(&self, id: TaskId, status: &str) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.set_status(status);
        Ok(())
    }

    async fn update_statuses(&self, ids: &[TaskId], status: &str) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(missing) = ids.iter().find(|id| !state.tasks.contains_key(id)) {
            return Err(TaskRepositoryError::NotFound(*missing));
        }
        for id in ids {
            if let Some(task) = state.tasks.get_mut(id) {
                task.set_status(status);
            }
        }
        Ok(())
    }

    async fn compare_and_set_status(
        &self,
        id: TaskId,
        expected: &str,
        status: &str,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if task.status() != expected {
            return Err(TaskRepositoryError::StatusConflict {
                task_id: id,
                expected: expected.to_owned(),
                actual: task.status().to_owned(),
            });
        }
        task.set_status(status);
        Ok(())
    }
}
