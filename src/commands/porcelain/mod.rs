//! User-facing commands
//!
//! Each command is an `impl Repository` block. Mutating commands load the state
//! record, validate everything before touching the working tree, and persist the
//! state only once the whole operation has succeeded.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;
