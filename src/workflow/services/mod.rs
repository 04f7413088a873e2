//! Application services for status propagation.

mod config;
mod propagation;

pub use config::PropagationConfig;
pub use propagation::{
    PropagationOutcome, StatusPropagationError, StatusPropagationResult,
    StatusPropagationService,
};
