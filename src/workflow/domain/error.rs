//! Error types for workflow validation, ordering and propagation.

use crate::task::domain::TaskId;
use thiserror::Error;

/// Configuration errors found while validating a project workflow.
///
/// These are surfaced to the project owner as "fix your workflow" feedback
/// and are never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowConfigError {
    /// The workflow contains no statuses at all.
    #[error("workflow must contain at least one status")]
    NoStatusProvided,

    /// A status name is empty after trimming.
    #[error("workflow status names must not be blank")]
    EmptyStatusName,

    /// Two statuses share the same name.
    #[error("duplicate workflow status: {0}")]
    DuplicateStatus(String),

    /// A predecessor refers to a status that is not part of the workflow.
    #[error("status '{status}' lists unknown predecessor '{predecessor}'")]
    UnknownPredecessor {
        /// Status declaring the predecessor.
        status: String,
        /// Predecessor name that does not exist.
        predecessor: String,
    },

    /// No status is marked as the default entry status.
    #[error("workflow has no default status")]
    NoDefaultStatus,

    /// More than one status is marked as default.
    #[error("workflow has multiple default statuses: {}", .0.join(", "))]
    MultipleDefaultStatus(Vec<String>),

    /// The default status has predecessors and so is not an entry point.
    #[error("default status '{0}' must not have predecessors")]
    DefaultStatusHasPredecessors(String),

    /// No status is marked as done.
    #[error("workflow has no done status")]
    NoDoneStatus,

    /// The predecessor relation contains a cycle through the listed statuses.
    #[error("workflow contains a cycle: {}", .0.join(" -> "))]
    CyclicWorkflow(Vec<String>),
}

/// Errors raised while ordering a workflow.
///
/// Ordering a validated graph cannot fail; hitting this error means a graph
/// bypassed validation and indicates a programming defect.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderingError {
    /// Not every status could be placed in the order.
    #[error("workflow ordering incomplete: ordered {ordered} of {expected} statuses")]
    OrderingIncomplete {
        /// Number of statuses placed before the ready queue ran dry.
        ordered: usize,
        /// Number of statuses in the input.
        expected: usize,
    },
}

/// Data-consistency errors raised while recomputing statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PropagationError {
    /// A task references a status missing from its project's workflow.
    #[error("task {task_id} has status '{status}' which is not part of the workflow")]
    UnknownTaskStatus {
        /// Task carrying the unknown status.
        task_id: TaskId,
        /// The unknown status name.
        status: String,
    },
}

/// Errors raised while planning a wholesale workflow replacement.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowEditError {
    /// The proposed workflow is invalid.
    #[error(transparent)]
    Config(#[from] WorkflowConfigError),

    /// The edit removes statuses that tasks still use.
    #[error("workflow statuses still used by tasks: {}", .0.join(", "))]
    StatusInUse(Vec<String>),
}
