//! Task identity and hierarchy for the workflow engine.
//!
//! Tasks are owned by an external task service. This module only models the
//! fields the workflow engine interprets (identifier, type, status and parent
//! reference), the fixed Epic/Story/Task/Bug/SubTask hierarchy rules, and the
//! persistence capability the engine consumes. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
