//! Unit tests for the persisting delivery module.
