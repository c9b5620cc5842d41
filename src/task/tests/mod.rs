//! Unit tests for task ordering.
