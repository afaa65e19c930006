//! Workspace-level test package. See `tests/` for cross-crate scenarios.
