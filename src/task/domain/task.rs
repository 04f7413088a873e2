//! Read model of a task as interpreted by the workflow engine.

use super::{TaskId, TaskType};
use serde::{Deserialize, Serialize};

/// Task fields relevant to hierarchy and status propagation.
///
/// The status is a workflow status name of the owning project. It is not
/// checked on construction because the project graph is supplied separately
/// by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    #[serde(rename = "type")]
    task_type: TaskType,
    status: String,
    parent_id: Option<TaskId>,
}

impl Task {
    /// Creates a task view without a parent.
    #[must_use]
    pub fn new(id: TaskId, task_type: TaskType, status: impl Into<String>) -> Self {
        Self {
            id,
            task_type,
            status: status.into(),
            parent_id: None,
        }
    }

    /// Sets the parent task reference.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the current workflow status name.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the parent task reference, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub(crate) const fn set_parent_id(&mut self, parent_id: Option<TaskId>) {
        self.parent_id = parent_id;
    }
}
