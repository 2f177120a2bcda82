//! Three-way merge
//!
//! - `merge_plan`: per-file decisions from the split point, current and given snapshots
//! - `conflict`: conflict marker rendering
//! - `outcome`: what a merge did, reported back to the caller

pub mod conflict;
pub mod merge_plan;
pub mod outcome;
