//! Workflow status nodes and the default workflow seed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One node of a project's status graph.
///
/// The serialized form matches the stored project document:
/// `{"status": "...", "previousStatuses": [...], "isDefault": .., "isDone": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    #[serde(rename = "status")]
    name: String,
    #[serde(rename = "previousStatuses", default)]
    predecessors: BTreeSet<String>,
    #[serde(default)]
    is_default: bool,
    #[serde(default)]
    is_done: bool,
}

impl WorkflowStatus {
    /// Creates a non-default, non-done status without predecessors.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predecessors: BTreeSet::new(),
            is_default: false,
            is_done: false,
        }
    }

    /// Sets the statuses that must precede this one.
    #[must_use]
    pub fn with_predecessors<I, S>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors = predecessors.into_iter().map(Into::into).collect();
        self
    }

    /// Marks this status as the default entry status.
    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Marks this status as a done status.
    #[must_use]
    pub const fn as_done(mut self) -> Self {
        self.is_done = true;
        self
    }

    /// Returns the status name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the names of the statuses that must precede this one.
    #[must_use]
    pub const fn predecessors(&self) -> &BTreeSet<String> {
        &self.predecessors
    }

    /// Returns `true` for the default entry status.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns `true` for done statuses.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.is_done
    }
}

/// Returns the workflow seeded into every new project:
/// `Todo -> In Progress -> Done`.
///
/// Each call builds fresh values.
#[must_use]
pub fn default_workflow() -> Vec<WorkflowStatus> {
    vec![
        WorkflowStatus::new("Todo").as_default(),
        WorkflowStatus::new("In Progress").with_predecessors(["Todo"]),
        WorkflowStatus::new("Done")
            .with_predecessors(["In Progress"])
            .as_done(),
    ]
}
