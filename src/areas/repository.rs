use crate::areas::database::Database;
use crate::areas::state::RepositoryState;
use crate::areas::workspace::Workspace;
use crate::areas::{OBJECTS_DIR, STATE_FILE, TWIG_DIR};
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit, timestamp_from_env};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::graph::commit_graph::CommitGraph;
use std::cell::{RefCell, RefMut};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let database = Database::new(path.join(TWIG_DIR).join(OBJECTS_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `.twig` metadata directory
    pub fn twig_path(&self) -> PathBuf {
        self.path.join(TWIG_DIR)
    }

    pub fn state_path(&self) -> PathBuf {
        self.twig_path().join(STATE_FILE)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn load_state(&self) -> anyhow::Result<RepositoryState> {
        RepositoryState::load(&self.state_path())
    }

    pub fn persist_state(&self, state: &RepositoryState) -> anyhow::Result<()> {
        state.persist(&self.state_path())
    }

    pub fn head_commit(&self, state: &RepositoryState) -> anyhow::Result<Commit> {
        self.database.load_commit(state.refs().head()?)
    }

    pub fn commit_graph(
        &self,
    ) -> CommitGraph<impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + '_> {
        CommitGraph::new(|oid: &ObjectId| Ok(self.database.load_commit(oid)?.slim()))
    }

    /// Files tracked by HEAD or staged for addition
    pub fn tracked_files(state: &RepositoryState, head: &Commit) -> BTreeSet<String> {
        head.files()
            .keys()
            .chain(state.index().added().keys())
            .cloned()
            .collect()
    }

    /// Plan the replacement of the working tree by `target`'s snapshot
    ///
    /// Fails with `UntrackedFileWouldBeOverwritten` before anything is touched.
    pub fn plan_checkout(
        &self,
        state: &RepositoryState,
        target: &Commit,
    ) -> anyhow::Result<Migration> {
        let head = self.head_commit(state)?;

        Migration::plan(
            &Self::tracked_files(state, &head),
            target.files(),
            &self.workspace.list_files()?,
        )
    }

    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        self.workspace
            .apply_migration(migration, |oid| self.database.load_blob(oid))
    }

    /// Blobs of the next snapshot: HEAD's files with the staged changes applied
    pub fn snapshot_blobs(&self, state: &RepositoryState) -> anyhow::Result<Vec<Blob>> {
        let mut files = self.head_commit(state)?.files().clone();

        for filename in state.index().removed() {
            files.remove(filename);
        }
        for (filename, oid) in state.index().added() {
            files.insert(filename.clone(), oid.clone());
        }

        files
            .values()
            .map(|oid| self.database.load_blob(oid))
            .collect()
    }

    /// Create a commit from the staged snapshot and move the current branch to it
    pub fn write_commit(
        &self,
        state: &mut RepositoryState,
        message: String,
        parents: Vec<ObjectId>,
    ) -> anyhow::Result<Commit> {
        let blobs = self.snapshot_blobs(state)?;
        let commit = Commit::new(message, timestamp_from_env()?, parents, &blobs)?;

        self.database.store(&commit)?;
        state.catalog_mut().register(&commit);
        state.refs_mut().update_head(commit.object_id().clone());
        state.index_mut().clear();
        tracing::info!(commit = %commit.object_id(), branch = state.refs().current_branch(), "created commit");

        Ok(commit)
    }
}
