use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::merge::outcome::MergeOutcome;
use crate::artifacts::remote::directory::DirectoryTransport;
use crate::artifacts::remote::local::LocalStore;
use crate::artifacts::remote::sync::replicate;
use crate::artifacts::remote::transport::{BranchState, Transport};
use std::path::{MAIN_SEPARATOR, PathBuf};

impl Repository {
    /// Register a remote under `name`, pointing at another repository's `.twig` directory
    pub fn add_remote(&self, name: &str, path: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let path = path.replace('/', &MAIN_SEPARATOR.to_string());
        state.add_remote(name, PathBuf::from(path))?;

        self.persist_state(&state)
    }

    pub fn remove_remote(&self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        state.remove_remote(name)?;

        self.persist_state(&state)
    }

    /// Send the current branch's history to `remote` and move its `branch` there
    ///
    /// The remote head must already be part of the local history.
    pub fn push(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let mut transport = self.open_remote(&state, remote)?;
        let head = state.refs().head()?.clone();

        if let Some(remote_head) = transport.read_branch(branch)? {
            if !self.commit_graph().is_ancestor(&remote_head, &head)? {
                return Err(TwigError::RemoteNeedsPull.into());
            }
        }

        replicate(
            &LocalStore::new(self.database(), &mut state),
            &mut transport,
            &head,
        )?;
        transport.write_branch(branch, &head)?;
        transport.flush()?;
        tracing::info!(remote, branch, %head, "pushed");

        Ok(())
    }

    pub fn fetch(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        self.fetch_into(&mut state, remote, branch)?;

        self.persist_state(&state)
    }

    /// Fetch then merge `<remote>/<branch>`; nothing is persisted unless both succeed
    pub fn pull(&self, remote: &str, branch: &str) -> anyhow::Result<MergeOutcome> {
        let mut state = self.load_state()?;

        let tracking_branch = self.fetch_into(&mut state, remote, branch)?;
        let outcome = self.merge_into(&mut state, &tracking_branch)?;

        self.persist_state(&state)?;
        self.report_merge(&outcome)?;

        Ok(outcome)
    }

    /// Copy the remote branch's history in and point `<remote>/<branch>` at its head
    ///
    /// # Returns
    ///
    /// Name of the local tracking branch
    fn fetch_into(
        &self,
        state: &mut RepositoryState,
        remote: &str,
        branch: &str,
    ) -> anyhow::Result<String> {
        let transport = self.open_remote(state, remote)?;
        let remote_head = transport
            .read_branch(branch)?
            .ok_or_else(|| TwigError::RemoteMissingBranch(branch.to_string()))?;

        replicate(
            &transport,
            &mut LocalStore::new(self.database(), state),
            &remote_head,
        )?;

        let tracking_branch = format!("{}/{}", remote, branch);
        state
            .refs_mut()
            .update_branch(&tracking_branch, remote_head);

        Ok(tracking_branch)
    }

    fn open_remote(
        &self,
        state: &RepositoryState,
        remote: &str,
    ) -> anyhow::Result<DirectoryTransport> {
        // relative remote paths are taken from the repository root
        DirectoryTransport::open(&self.path().join(state.remote(remote)?))
    }
}
