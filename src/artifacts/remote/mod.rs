//! Replication between repositories
//!
//! - `transport`: the traits a store must offer to take part in replication
//! - `local`: the current repository as a transport endpoint
//! - `directory`: another repository reached by the path of its `.twig` directory
//! - `sync`: copying the history reachable from a head between two endpoints

pub mod directory;
pub mod local;
pub mod sync;
pub mod transport;
