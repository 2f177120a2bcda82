//! Commit history display
//!
//! - `rev_list`: first-parent walk from a head commit
//!
//! Every entry is rendered as:
//!
//! ```text
//! ===
//! commit <id>
//! Merge: <parent1-short> <parent2-short>   (merge commits only)
//! Date: <EEE MMM d HH:mm:ss yyyy Z>
//! <message>
//!
//! ```

pub mod rev_list;

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use derive_new::new;
use std::fmt;

#[derive(new)]
pub struct LogEntry<'c> {
    commit: &'c Commit,
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===")?;
        writeln!(f, "commit {}", self.commit.object_id())?;
        if let [first, second] = self.commit.parents() {
            writeln!(f, "Merge: {} {}", first.to_short_oid(), second.to_short_oid())?;
        }
        writeln!(f, "Date: {}", self.commit.readable_timestamp())?;
        writeln!(f, "{}", self.commit.message())
    }
}
