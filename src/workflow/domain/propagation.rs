//! Parent status recomputation from child statuses.
//!
//! A parent is only as far along as its least advanced child. Both
//! functions here are pure: persisting the result, and deciding when to
//! call them, belongs to the caller.

use super::{PropagationError, WorkflowOrdering};
use crate::task::domain::{Task, TaskId};
use crate::workflow::TRACING_TARGET;

/// Recomputed status for a parent task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentStatus {
    /// Status the parent should have.
    pub status: String,
    /// Whether `status` differs from the parent's current status.
    pub changed: bool,
}

/// Recomputes a parent's status as the least advanced status among its
/// children.
///
/// An empty child list leaves the parent untouched and reports no change.
/// The function is idempotent: feeding the returned status back in as
/// `current_parent_status` yields `changed == false`.
///
/// # Errors
///
/// Returns [`PropagationError::UnknownTaskStatus`] for the first child whose
/// status is not part of `ordering`; such children are never skipped.
pub fn recompute_parent_status(
    ordering: &WorkflowOrdering,
    children: &[Task],
    current_parent_status: &str,
) -> Result<ParentStatus, PropagationError> {
    let mut least_advanced: Option<(usize, &str)> = None;
    for child in children {
        let position = ordering
            .position(child.status())
            .ok_or_else(|| unknown_status(child.id(), child.status()))?;
        match least_advanced {
            Some((least, _)) if least <= position => {}
            _ => least_advanced = Some((position, child.status())),
        }
    }

    let Some((_, status)) = least_advanced else {
        return Ok(ParentStatus {
            status: current_parent_status.to_owned(),
            changed: false,
        });
    };

    Ok(ParentStatus {
        status: status.to_owned(),
        changed: status != current_parent_status,
    })
}

/// Returns the children that must follow their parent's new status.
///
/// Only stories, tasks and bugs cascade their status down to sub-tasks;
/// any other parent type yields an empty list. Children already in the
/// parent's status are left out.
///
/// # Errors
///
/// Returns [`PropagationError::UnknownTaskStatus`] when the parent's status
/// is not part of `ordering`.
pub fn plan_cascade(
    ordering: &WorkflowOrdering,
    parent: &Task,
    children: &[Task],
) -> Result<Vec<TaskId>, PropagationError> {
    if !parent.task_type().cascades_status_to_children() {
        return Ok(Vec::new());
    }
    if ordering.position(parent.status()).is_none() {
        return Err(unknown_status(parent.id(), parent.status()));
    }

    Ok(children
        .iter()
        .filter(|child| child.status() != parent.status())
        .map(Task::id)
        .collect())
}

fn unknown_status(task_id: TaskId, status: &str) -> PropagationError {
    tracing::warn!(
        target: TRACING_TARGET,
        task_id = %task_id,
        status = %status,
        "Task status is not part of the project workflow"
    );
    PropagationError::UnknownTaskStatus {
        task_id,
        status: status.to_owned(),
    }
}
