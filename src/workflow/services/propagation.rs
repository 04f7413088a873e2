//! Store-backed status propagation between parent and child tasks.
//!
//! Propagation runs synchronously with the triggering change and writes the
//! parent with optimistic concurrency: the parent is only updated if its
//! stored status is still the one the recomputation was based on. After a
//! write the children are read again, and a result that no longer matches
//! them is recomputed. Either kind of conflict retries the whole
//! read-recompute-write cycle under the same budget.

use super::PropagationConfig;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::workflow::{
    TRACING_TARGET,
    domain::{PropagationError, WorkflowOrdering, plan_cascade, recompute_parent_status},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for status propagation.
#[derive(Debug, Error)]
pub enum StatusPropagationError {
    /// Task data is inconsistent with the workflow.
    #[error(transparent)]
    Propagation(#[from] PropagationError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Every attempt to write a status lost a concurrent update race.
    #[error("gave up updating status of task {task_id} after {attempts} conflicting attempts")]
    ConflictRetriesExhausted {
        /// Parent task that could not be written.
        task_id: TaskId,
        /// Number of attempts made.
        attempts: u32,
    },
}

/// Result type for status propagation service operations.
pub type StatusPropagationResult<T> = Result<T, StatusPropagationError>;

/// Result of propagating child statuses to a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationOutcome {
    /// Parent task the statuses were propagated to.
    pub parent_id: TaskId,
    /// Parent status read by the successful attempt.
    pub previous_status: String,
    /// Parent status after propagation.
    pub status: String,
    /// Whether the parent status was written.
    pub changed: bool,
    /// Number of read-recompute-write attempts made.
    pub attempts: u32,
}

/// Status propagation orchestration service.
#[derive(Clone)]
pub struct StatusPropagationService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
    config: PropagationConfig,
}

impl<R> StatusPropagationService<R>
where
    R: TaskRepository,
{
    /// Creates a new status propagation service.
    #[must_use]
    pub const fn new(repository: Arc<R>, config: PropagationConfig) -> Self {
        Self { repository, config }
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Recomputes a parent's status from a fresh snapshot of its children and
    /// persists it when it changed.
    ///
    /// Call this with the former parent after a task is deleted or moved
    /// away, and with the new parent after a task is created under it or
    /// moved to it.
    ///
    /// # Errors
    ///
    /// Returns [`StatusPropagationError::Repository`] when the parent does not
    /// exist or the store fails, [`StatusPropagationError::Propagation`] when
    /// a child status is unknown to `ordering`, and
    /// [`StatusPropagationError::ConflictRetriesExhausted`] when every attempt
    /// conflicted with a concurrent parent or child change.
    pub async fn propagate_to_parent(
        &self,
        ordering: &WorkflowOrdering,
        parent_id: TaskId,
    ) -> StatusPropagationResult<PropagationOutcome> {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);

            let parent = self.load(parent_id).await?;
            let children = self.repository.find_children(parent_id).await?;
            let recomputed = recompute_parent_status(ordering, &children, parent.status())?;

            let outcome = PropagationOutcome {
                parent_id,
                previous_status: parent.status().to_owned(),
                status: recomputed.status,
                changed: recomputed.changed,
                attempts,
            };
            if !outcome.changed {
                tracing::debug!(
                    target: TRACING_TARGET,
                    parent_id = %parent_id,
                    status = %outcome.status,
                    child_count = children.len(),
                    "Parent status already consistent with children"
                );
                return Ok(outcome);
            }

            let write = self
                .repository
                .compare_and_set_status(parent_id, &outcome.previous_status, &outcome.status)
                .await;
            match write {
                Ok(()) => {
                    let settled = self.repository.find_children(parent_id).await?;
                    let check = recompute_parent_status(ordering, &settled, &outcome.status)?;
                    if !check.changed {
                        tracing::debug!(
                            target: TRACING_TARGET,
                            parent_id = %parent_id,
                            from = %outcome.previous_status,
                            to = %outcome.status,
                            attempts,
                            "Parent status updated from children"
                        );
                        return Ok(outcome);
                    }
                    self.retry_or_give_up(parent_id, attempts)?;
                    tracing::warn!(
                        target: TRACING_TARGET,
                        parent_id = %parent_id,
                        written = %outcome.status,
                        expected = %check.status,
                        attempts,
                        "Children changed while parent status was written, retrying"
                    );
                    tokio::task::yield_now().await;
                }
                Err(TaskRepositoryError::StatusConflict { actual, .. }) => {
                    self.retry_or_give_up(parent_id, attempts)?;
                    tracing::warn!(
                        target: TRACING_TARGET,
                        parent_id = %parent_id,
                        expected = %outcome.previous_status,
                        actual = %actual,
                        attempts,
                        "Parent status changed concurrently, retrying"
                    );
                    tokio::task::yield_now().await;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Propagates to the parent of `child_id` after the child's status
    /// changed.
    ///
    /// Returns `Ok(None)` when the child has no parent.
    ///
    /// # Errors
    ///
    /// Returns [`StatusPropagationError::Repository`] when the child does not
    /// exist, plus every error of [`Self::propagate_to_parent`].
    pub async fn on_child_changed(
        &self,
        ordering: &WorkflowOrdering,
        child_id: TaskId,
    ) -> StatusPropagationResult<Option<PropagationOutcome>> {
        let child = self.load(child_id).await?;
        let Some(parent_id) = child.parent_id() else {
            return Ok(None);
        };
        self.propagate_to_parent(ordering, parent_id)
            .await
            .map(Some)
    }

    /// Copies the status of a story, task or bug down to its sub-tasks.
    ///
    /// The selected sub-tasks are written in one batch. If the parent's
    /// status changed while the batch was planned or written, the cascade
    /// runs again from the new status under the conflict retry budget.
    ///
    /// Returns the identifiers of the children updated by the last attempt.
    /// Nothing is written when cascading is disabled or the parent type does
    /// not cascade.
    ///
    /// # Errors
    ///
    /// Returns [`StatusPropagationError::Repository`] when the parent does not
    /// exist or a write fails, [`StatusPropagationError::Propagation`] when
    /// the parent's status is unknown to `ordering`, and
    /// [`StatusPropagationError::ConflictRetriesExhausted`] when the parent
    /// kept changing.
    pub async fn cascade_to_children(
        &self,
        ordering: &WorkflowOrdering,
        parent_id: TaskId,
    ) -> StatusPropagationResult<Vec<TaskId>> {
        if !self.config.cascade_to_children {
            return Ok(Vec::new());
        }

        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);

            let parent = self.load(parent_id).await?;
            let children = self.repository.find_children(parent_id).await?;
            let targets = plan_cascade(ordering, &parent, &children)?;
            if !targets.is_empty() {
                self.repository
                    .update_statuses(&targets, parent.status())
                    .await?;
            }

            let current = self.load(parent_id).await?;
            if current.status() == parent.status() {
                if !targets.is_empty() {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        parent_id = %parent_id,
                        status = %parent.status(),
                        updated = targets.len(),
                        attempts,
                        "Cascaded parent status to children"
                    );
                }
                return Ok(targets);
            }

            self.retry_or_give_up(parent_id, attempts)?;
            tracing::warn!(
                target: TRACING_TARGET,
                parent_id = %parent_id,
                cascaded = %parent.status(),
                actual = %current.status(),
                attempts,
                "Parent status changed during cascade, retrying"
            );
            tokio::task::yield_now().await;
        }
    }

    /// Fails with [`StatusPropagationError::ConflictRetriesExhausted`] once
    /// `attempts` exceeds the configured retry budget.
    fn retry_or_give_up(&self, task_id: TaskId, attempts: u32) -> StatusPropagationResult<()> {
        if attempts <= self.config.max_conflict_retries {
            return Ok(());
        }
        tracing::error!(
            target: TRACING_TARGET,
            task_id = %task_id,
            attempts,
            "Status write kept conflicting with concurrent changes"
        );
        Err(StatusPropagationError::ConflictRetriesExhausted { task_id, attempts })
    }

    async fn load(&self, id: TaskId) -> StatusPropagationResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(StatusPropagationError::Repository(
                TaskRepositoryError::NotFound(id),
            ))
    }
}
