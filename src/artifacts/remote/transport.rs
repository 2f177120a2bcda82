use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Result;

/// Immutable, content-addressed side of a replication endpoint
pub trait ObjectStore {
    /// Whether the endpoint already knows this commit
    fn has_commit(&self, oid: &ObjectId) -> Result<bool>;

    fn has_blob(&self, oid: &ObjectId) -> Result<bool>;

    /// Read a commit; fails if it doesn't exist
    fn read_commit(&self, oid: &ObjectId) -> Result<Commit>;

    /// Read a blob; fails if it doesn't exist
    fn read_blob(&self, oid: &ObjectId) -> Result<Blob>;

    /// Store a commit and make it known to the endpoint.
    /// Writing a commit that already exists is a no-op.
    fn write_commit(&mut self, commit: &Commit) -> Result<()>;

    fn write_blob(&mut self, blob: &Blob) -> Result<()>;
}

/// Mutable branch table of a replication endpoint
pub trait BranchState {
    /// Head of a branch, `None` when the branch doesn't exist
    fn read_branch(&self, name: &str) -> Result<Option<ObjectId>>;

    /// Point a branch at a commit, creating it when missing
    fn write_branch(&mut self, name: &str, head: &ObjectId) -> Result<()>;
}

/// Combined replication endpoint
pub trait Transport: ObjectStore + BranchState {
    /// Make every write so far durable
    fn flush(&mut self) -> Result<()>;
}
