//! Command implementations
//!
//! - `porcelain`: User-facing commands (init, add, commit, merge, push, ...)
//!
//! Every command loads the repository state, validates all of its preconditions,
//! and only then touches the working tree and persists the new state.

pub mod porcelain;
