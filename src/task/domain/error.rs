//! Error types for task hierarchy validation and parsing.

use super::TaskType;
use thiserror::Error;

/// Errors returned while validating task hierarchy rules.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The parent task type cannot hold a child of the given type.
    #[error("task of type {child} cannot have a parent of type {parent}")]
    InvalidParentType {
        /// Type of the task being created or reparented.
        child: TaskType,
        /// Type of the requested parent task.
        parent: TaskType,
    },

    /// The task type cannot be changed to the requested type.
    #[error("task type cannot change from {from} to {to}")]
    TypeChangeNotAllowed {
        /// Current task type.
        from: TaskType,
        /// Requested task type.
        to: TaskType,
    },
}

/// Error returned while parsing task types from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task type: {0}")]
pub struct ParseTaskTypeError(pub String);
