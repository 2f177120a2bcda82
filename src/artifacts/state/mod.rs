//! Repository state record format
//!
//! Everything mutable about a repository (refs, the commit catalog, remotes and the
//! staging area) is kept in one binary record at `.twig/state`.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (8 bytes):
//!   - Signature: "TWST" (4 bytes)
//!   - Version: 1 (4 bytes)
//!
//! Sections, in order:
//!   - current branch
//!   - branches        (count, then name + head id)
//!   - commits         (count, then id)
//!   - short ids       (count, then prefix + id)
//!   - messages        (count, then message + id count + ids)
//!   - remotes         (count, then name + path)
//!   - staged added    (count, then file name + blob id)
//!   - staged removed  (count, then file name)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! Counts and string lengths are network-endian u32. Ids are stored as 20 raw bytes.

pub mod checksum;
pub mod state_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the state header in bytes
pub const HEADER_SIZE: usize = 8; // 4 bytes for marker, 4 for version

/// Magic signature identifying state records
pub const SIGNATURE: &str = "TWST";

/// State record format version
pub const VERSION: u32 = 1;
