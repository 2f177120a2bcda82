//! Working tree status
//!
//! - `file_change`: kinds of unstaged modification
//! - `status_info`: the five status sections and their rendering

pub mod file_change;
pub mod status_info;
