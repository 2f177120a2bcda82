use crate::areas::database::Database;
use crate::areas::state::RepositoryState;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::remote::transport::{BranchState, ObjectStore, Transport};
use derive_new::new;

/// The repository running the command, seen as a replication endpoint
///
/// Writes land in the borrowed state; the command persists it once everything
/// else has succeeded, so `flush` does nothing here.
#[derive(new)]
pub struct LocalStore<'r> {
    database: &'r Database,
    state: &'r mut RepositoryState,
}

impl ObjectStore for LocalStore<'_> {
    fn has_commit(&self, oid: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.state.catalog().contains(oid))
    }

    fn has_blob(&self, oid: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.database.has_blob(oid))
    }

    fn read_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database.load_commit(oid)
    }

    fn read_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        self.database.load_blob(oid)
    }

    fn write_commit(&mut self, commit: &Commit) -> anyhow::Result<()> {
        self.database.store(commit)?;
        self.state.catalog_mut().register(commit);
        Ok(())
    }

    fn write_blob(&mut self, blob: &Blob) -> anyhow::Result<()> {
        self.database.store(blob)
    }
}

impl BranchState for LocalStore<'_> {
    fn read_branch(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.state.refs().branches().get(name).cloned())
    }

    fn write_branch(&mut self, name: &str, head: &ObjectId) -> anyhow::Result<()> {
        self.state.refs_mut().update_branch(name, head.clone());
        Ok(())
    }
}

impl Transport for LocalStore<'_> {
    fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
