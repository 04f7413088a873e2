//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces the workflow services use
//! to read children and write recomputed statuses.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
