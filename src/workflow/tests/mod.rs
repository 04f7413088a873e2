//! Unit tests for workflow validation, ordering and propagation.
