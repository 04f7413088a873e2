//! Nexus workflow: the project workflow engine of a task-tracking backend.
//!
//! Each project defines its own graph of named task statuses. This crate
//! validates that graph, derives a deterministic progress ordering over it,
//! and keeps parent tasks (epics, stories) consistent with the statuses of
//! their children.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory storage)
//!
//! # Modules
//!
//! - [`task`]: Task identity, task type hierarchy and the task persistence port
//! - [`workflow`]: Workflow graph validation, ordering and status propagation

pub mod task;
pub mod workflow;
