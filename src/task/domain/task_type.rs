//! Task types and the fixed parent/child hierarchy between them.
//!
//! The hierarchy is not project-configurable:
//!
//! - `Epic` is a root and never has a parent.
//! - `Story`, `Task` and `Bug` sit directly under an `Epic`.
//! - `SubTask` sits under a `Story`, `Task` or `Bug`.

use super::{ParseTaskTypeError, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work item, determining where it may sit in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// Large body of work grouping stories, tasks and bugs.
    Epic,
    /// User-facing piece of functionality.
    Story,
    /// Technical work item.
    Task,
    /// Defect report.
    Bug,
    /// Smallest unit of work, nested under a story, task or bug.
    SubTask,
}

impl TaskType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Epic => "EPIC",
            Self::Story => "STORY",
            Self::Task => "TASK",
            Self::Bug => "BUG",
            Self::SubTask => "SUB_TASK",
        }
    }

    /// Returns the depth of the type in the hierarchy, `0` being the root.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Epic => 0,
            Self::Story | Self::Task | Self::Bug => 1,
            Self::SubTask => 2,
        }
    }

    /// Returns `true` when a task of this type may be the parent of `child`.
    #[must_use]
    pub const fn accepts_child(self, child: Self) -> bool {
        match child {
            Self::Epic => false,
            Self::Story | Self::Task | Self::Bug => matches!(self, Self::Epic),
            Self::SubTask => matches!(self, Self::Story | Self::Task | Self::Bug),
        }
    }

    /// Returns `true` when a status change on this type is copied down to
    /// its sub-tasks.
    #[must_use]
    pub const fn cascades_status_to_children(self) -> bool {
        matches!(self, Self::Story | Self::Task | Self::Bug)
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "EPIC" => Ok(Self::Epic),
            "STORY" => Ok(Self::Story),
            "TASK" => Ok(Self::Task),
            "BUG" => Ok(Self::Bug),
            "SUB_TASK" | "SUBTASK" => Ok(Self::SubTask),
            _ => Err(ParseTaskTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates that `child` may be placed under a parent of type `parent`.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidParentType`] carrying both types when
/// the combination is not part of the hierarchy. An `Epic` child is always
/// rejected.
pub const fn validate_parent_type(
    child: TaskType,
    parent: TaskType,
) -> Result<(), TaskDomainError> {
    if parent.accepts_child(child) {
        Ok(())
    } else {
        Err(TaskDomainError::InvalidParentType { child, parent })
    }
}

/// Validates an optional parent for a task of type `child`.
///
/// Tasks without a parent are accepted for every type.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidParentType`] when a parent is present
/// and [`validate_parent_type`] rejects it.
pub const fn validate_parent(
    child: TaskType,
    parent: Option<TaskType>,
) -> Result<(), TaskDomainError> {
    match parent {
        Some(parent_type) => validate_parent_type(child, parent_type),
        None => Ok(()),
    }
}

/// Validates changing a task from type `from` to type `to`.
///
/// Only the same-level types `Story`, `Task` and `Bug` are interchangeable.
/// Epics and sub-tasks keep their type for their whole lifetime.
///
/// # Errors
///
/// Returns [`TaskDomainError::TypeChangeNotAllowed`] for any other change.
pub const fn validate_type_change(
    from: TaskType,
    to: TaskType,
) -> Result<(), TaskDomainError> {
    if from.level() == 1 && to.level() == 1 {
        Ok(())
    } else {
        Err(TaskDomainError::TypeChangeNotAllowed { from, to })
    }
}
