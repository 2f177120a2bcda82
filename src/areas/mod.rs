//! Core repository components
//!
//! - `database`: Object database for storing blobs and commits
//! - `index`: Staging area for pending additions and removals
//! - `refs`: Branch table and the current branch
//! - `catalog`: Every known commit with its short-id and message indexes
//! - `state`: The persisted aggregate of refs, catalog, remotes and staging area
//! - `repository`: High-level repository operations and coordination
//! - `workspace`: Working directory file system operations

pub mod catalog;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod state;
pub mod workspace;

/// Name of the metadata directory inside the working directory
pub const TWIG_DIR: &str = ".twig";

/// Object database directory inside the metadata directory
pub const OBJECTS_DIR: &str = "objects";

/// State record inside the metadata directory
pub const STATE_FILE: &str = "state";
