//! Twig data structures and algorithms
//!
//! - `checkout`: Working-tree replacement planning
//! - `core`: Shared utilities (error kinds, pager wrapper)
//! - `graph`: Ancestry queries and split-point discovery
//! - `log`: Commit history traversal and display
//! - `merge`: Three-way merge decisions and conflict rendering
//! - `objects`: Object types (blob, commit)
//! - `remote`: Replication between repositories
//! - `state`: Binary format of the repository state record
//! - `status`: Working tree status inspection

pub mod checkout;
pub mod core;
pub mod graph;
pub mod log;
pub mod merge;
pub mod objects;
pub mod remote;
pub mod state;
pub mod status;
