//! Configuration for status propagation.

use serde::{Deserialize, Serialize};

/// Configuration for [`super::StatusPropagationService`].
///
/// Deserializes from the service configuration; missing fields fall back to
/// [`PropagationConfig::default`].
///
/// # Examples
///
/// ```
/// use nexus_workflow::workflow::services::PropagationConfig;
///
/// let config = PropagationConfig::default();
/// assert_eq!(config.max_conflict_retries, 3);
/// assert!(config.cascade_to_children);
///
/// let strict = PropagationConfig::strict();
/// assert_eq!(strict.max_conflict_retries, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropagationConfig {
    /// Extra attempts after a parent status write loses an optimistic
    /// concurrency race.
    pub max_conflict_retries: u32,
    /// Whether a story, task or bug status change is copied to its sub-tasks.
    pub cascade_to_children: bool,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: 3,
            cascade_to_children: true,
        }
    }
}

impl PropagationConfig {
    /// Creates a configuration that fails on the first write conflict.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_conflict_retries: 0,
            cascade_to_children: true,
        }
    }

    /// Creates a configuration that never cascades statuses downwards.
    #[must_use]
    pub fn no_cascade() -> Self {
        Self {
            cascade_to_children: false,
            ..Default::default()
        }
    }
}
