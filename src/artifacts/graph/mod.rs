//! Commit graph queries
//!
//! - `commit_graph`: ancestor sets, ancestry checks and the merge split point

pub mod commit_graph;
