//! Domain model for project workflows.
//!
//! A workflow is validated once into a [`WorkflowGraph`], ordered into a
//! [`WorkflowOrdering`], and then used to recompute parent statuses.
//! Validated graphs are never edited in place: edits produce a new graph
//! through [`plan_workflow_edit`].

mod edit;
mod error;
mod graph;
mod ordering;
mod propagation;
mod status;

pub use edit::{WorkflowEdit, plan_workflow_edit};
pub use error::{OrderingError, PropagationError, WorkflowConfigError, WorkflowEditError};
pub use graph::WorkflowGraph;
pub use ordering::WorkflowOrdering;
pub use propagation::{ParentStatus, plan_cascade, recompute_parent_status};
pub use status::{WorkflowStatus, default_workflow};
