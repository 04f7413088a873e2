//! Domain model for tasks as seen by the workflow engine.
//!
//! The task domain validates parent/child type compatibility and exposes a
//! read-only task view while keeping all persistence concerns outside of the
//! domain boundary.

mod error;
mod ids;
mod task;
mod task_type;

pub use error::{ParseTaskTypeError, TaskDomainError};
pub use ids::TaskId;
pub use task::Task;
pub use task_type::{TaskType, validate_parent, validate_parent_type, validate_type_change};
