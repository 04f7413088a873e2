//! Unit tests for the task hierarchy and in-memory task storage.
