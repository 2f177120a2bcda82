//! Directory transport
//!
//! A remote is another twig repository on the same machine. Its `.twig` directory
//! is opened directly: objects go through its object database and branch moves
//! through its state record, which is rewritten on `flush`.

use crate::areas::database::Database;
use crate::areas::state::RepositoryState;
use crate::areas::{OBJECTS_DIR, STATE_FILE};
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::remote::transport::{BranchState, ObjectStore, Transport};
use std::path::Path;

#[derive(Debug)]
pub struct DirectoryTransport {
    path: Box<Path>,
    database: Database,
    state: RepositoryState,
}

impl DirectoryTransport {
    /// Open the repository whose metadata lives at `twig_dir`
    pub fn open(twig_dir: &Path) -> anyhow::Result<Self> {
        if !twig_dir.is_dir() {
            return Err(TwigError::RemoteDirectoryNotFound(twig_dir.to_path_buf()).into());
        }

        let state = RepositoryState::load(&twig_dir.join(STATE_FILE))?;
        let database = Database::new(twig_dir.join(OBJECTS_DIR).into_boxed_path());
        tracing::debug!(remote = %twig_dir.display(), "opened remote repository");

        Ok(DirectoryTransport {
            path: twig_dir.into(),
            database,
            state,
        })
    }
}

impl ObjectStore for DirectoryTransport {
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

impl BranchState for DirectoryTransport {
    fn read_branch(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.state.refs().branches().get(name).cloned())
    }

    fn write_branch(&mut self, name: &str, head: &ObjectId) -> anyhow::Result<()> {
        self.state.refs_mut().update_branch(name, head.clone());
        Ok(())
    }
}

impl Transport for DirectoryTransport {
    fn flush(&mut self) -> anyhow::Result<()> {
        self.state.persist(&self.path.join(STATE_FILE))
    }
}
