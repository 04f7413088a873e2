//! Wholesale workflow replacement.

use super::{WorkflowEditError, WorkflowGraph, WorkflowStatus};
use crate::workflow::TRACING_TARGET;
use std::collections::HashSet;

/// A validated replacement for a project's workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEdit {
    graph: WorkflowGraph,
    removed: Vec<String>,
}

impl WorkflowEdit {
    /// Returns the validated replacement graph.
    #[must_use]
    pub const fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    /// Returns the statuses of the current workflow the edit drops, in their
    /// declaration order.
    #[must_use]
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    /// Consumes the edit, returning the graph to persist.
    #[must_use]
    pub fn into_graph(self) -> WorkflowGraph {
        self.graph
    }
}

/// Validates a proposed workflow as a replacement for `current`.
///
/// `statuses_in_use` lists the statuses currently held by any task of the
/// project. Removing one of them would strand those tasks, so the edit is
/// refused instead; migrating the tasks first is up to the caller.
///
/// # Errors
///
/// Returns [`WorkflowEditError::Config`] when the proposed workflow is
/// invalid and [`WorkflowEditError::StatusInUse`] with the offending names
/// when removed statuses are still in use.
pub fn plan_workflow_edit<I, S>(
    current: &WorkflowGraph,
    proposed: Vec<WorkflowStatus>,
    statuses_in_use: I,
) -> Result<WorkflowEdit, WorkflowEditError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let graph = WorkflowGraph::validate(proposed)?;

    let removed: Vec<String> = current
        .statuses()
        .iter()
        .map(WorkflowStatus::name)
        .filter(|name| !graph.contains(name))
        .map(str::to_owned)
        .collect();

    let in_use: HashSet<String> = statuses_in_use
        .into_iter()
        .map(|status| status.as_ref().to_owned())
        .collect();
    let blocked: Vec<String> = removed
        .iter()
        .filter(|name| in_use.contains(name.as_str()))
        .cloned()
        .collect();

    if !blocked.is_empty() {
        tracing::warn!(
            target: TRACING_TARGET,
            statuses = ?blocked,
            "Workflow edit removes statuses still used by tasks"
        );
        return Err(WorkflowEditError::StatusInUse(blocked));
    }

    tracing::debug!(
        target: TRACING_TARGET,
        removed = ?removed,
        status_count = graph.len(),
        "Workflow edit planned"
    );
    Ok(WorkflowEdit { graph, removed })
}
