//! Twig: a small local version-control system
//!
//! A content-addressable store of blobs and commits, a staging area, a commit graph
//! with split-point discovery, a three-way merge and replication between
//! repositories on the same machine.
//!
//! - `areas`: the repository's moving parts (object database, refs, staging area, state)
//! - `artifacts`: data types and algorithms
//! - `commands`: one operation per user-visible command

pub mod areas;
pub mod artifacts;
pub mod commands;
