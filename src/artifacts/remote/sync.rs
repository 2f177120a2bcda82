//! History replication
//!
//! Walks parent links from a head with an explicit worklist, copying every commit
//! the destination lacks together with its blobs. A commit the destination already
//! has ends that branch of the walk: its whole history is there too.

use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::remote::transport::ObjectStore;
use std::collections::HashSet;

/// Copy everything reachable from `head` that `destination` is missing
///
/// # Returns
///
/// Number of commits copied
pub fn replicate(
    source: &impl ObjectStore,
    destination: &mut impl ObjectStore,
    head: &ObjectId,
) -> anyhow::Result<usize> {
    let mut visited = HashSet::new();
    let mut worklist = vec![head.clone()];
    let mut copied = 0;

    while let Some(commit_id) = worklist.pop() {
        if !visited.insert(commit_id.clone()) || destination.has_commit(&commit_id)? {
            continue;
        }

        let commit = source.read_commit(&commit_id)?;
        for blob_id in commit.files().values() {
            if !destination.has_blob(blob_id)? {
                destination.write_blob(&source.read_blob(blob_id)?)?;
            }
        }
        if &commit.recompute_id(|oid| destination.read_blob(oid))? != commit.object_id() {
            anyhow::bail!("Commit {} does not match its content", commit_id);
        }
        worklist.extend(commit.parents().iter().cloned());

        destination.write_commit(&commit)?;
        tracing::debug!(commit = %commit.object_id(), "replicated commit");
        copied += 1;
    }

    tracing::info!(%head, copied, "replication finished");
    Ok(copied)
}
