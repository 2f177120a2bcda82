//! Working-tree replacement
//!
//! Checkout of a branch, reset and fast-forward merges all swap the working tree
//! for another snapshot. The migration is planned first, including the untracked
//! file check, and only then applied.

pub mod migration;
