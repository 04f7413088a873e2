//! Repository port for the task reads and status writes the workflow engine
//! needs.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract consumed by status propagation.
///
/// Implementations belong to the task service; the workflow engine never
/// creates, deletes or reparents tasks through this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all direct children of the given parent task.
    ///
    /// The result is a consistent snapshot taken at call time.
    async fn find_children(&self, parent_id: TaskId) -> TaskRepositoryResult<Vec<Task>>;

    /// Overwrites the status of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_status(&self, id: TaskId, status: &str) -> TaskRepositoryResult<()>;

    /// Overwrites the status of several tasks in one all-or-nothing write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] for the first missing task,
    /// in which case no status is written.
    async fn update_statuses(&self, ids: &[TaskId], status: &str) -> TaskRepositoryResult<()>;

    /// Writes `status` only if the stored status still equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::StatusConflict`] when the stored status
    /// changed since it was read, or [`TaskRepositoryError::NotFound`] when
    /// the task does not exist.
    async fn compare_and_set_status(
        &self,
        id: TaskId,
        expected: &str,
        status: &str,
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored status no longer matches the status the caller read.
    #[error(
        "status of task {task_id} changed concurrently: expected '{expected}', found '{actual}'"
    )]
    StatusConflict {
        /// Task whose write was rejected.
        task_id: TaskId,
        /// Status the caller based its write on.
        expected: String,
        /// Status currently stored.
        actual: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
