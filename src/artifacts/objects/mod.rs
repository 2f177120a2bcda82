//! Stored object types and operations
//!
//! Everything twig persists besides the repository state is an immutable object
//! identified by a SHA-1 hash. There are two kinds:
//!
//! - **Blob**: one file's content snapshot, together with the file name it was taken from
//! - **Commit**: a message, a timestamp, up to two parents and the full tracked-file map
//!
//! All objects implement serialization/deserialization for the record format:
//! `<type> <version> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the prefix indexed for abbreviated commit references
pub const SHORT_ID_LENGTH: usize = 6;

/// Version written into every object record header
pub const OBJECT_FORMAT_VERSION: u32 = 1;
