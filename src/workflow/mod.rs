//! Project workflow engine.
//!
//! Every project owns a graph of named task statuses whose predecessor edges
//! express "must come before". This module validates such graphs, derives a
//! deterministic total progress order from them and recomputes parent task
//! statuses from their children. The module follows hexagonal architecture:
//!
//! - Pure graph and propagation logic in [`domain`]
//! - Store-backed orchestration in [`services`], built on the
//!   [`crate::task::ports::TaskRepository`] port
//!
//! Nothing in [`domain`] performs I/O or holds shared state, so every
//! function is safe to call concurrently from any number of request tasks.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;

/// Tracing target for workflow validation, ordering and propagation events.
pub const TRACING_TARGET: &str = "nexus_workflow::workflow";
