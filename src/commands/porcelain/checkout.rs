use crate::areas::repository::Repository;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::commit::Commit;

impl Repository {
    /// Restore a file from HEAD without staging it
    pub fn checkout_file(&self, filename: &str) -> anyhow::Result<()> {
        let state = self.load_state()?;
        let head = self.head_commit(&state)?;

        self.restore_file(&head, filename)
    }

    /// Restore a file from the commit named by a full or abbreviated id
    pub fn checkout_file_from_commit(&self, commit_id: &str, filename: &str) -> anyhow::Result<()> {
        let state = self.load_state()?;
        let commit_oid = state.catalog().resolve(commit_id)?;
        let commit = self.database().load_commit(&commit_oid)?;

        self.restore_file(&commit, filename)
    }

    fn restore_file(&self, commit: &Commit, filename: &str) -> anyhow::Result<()> {
        let blob_oid = commit
            .blob_id(filename)
            .ok_or_else(|| TwigError::FileNotInCommit(filename.to_string()))?;
        let blob = self.database().load_blob(blob_oid)?;

        self.workspace().write_file(filename, blob.content())
    }

    /// Switch to another branch, replacing the working tree with its head snapshot
    pub fn checkout_branch(&self, branch: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let target_oid = state.refs().branch(branch)?.clone();
        if state.refs().is_current_branch(branch) {
            return Err(TwigError::CannotCheckoutCurrentBranch.into());
        }

        let target = self.database().load_commit(&target_oid)?;
        let migration = self.plan_checkout(&state, &target)?;

        self.apply_migration(&migration)?;
        state.refs_mut().switch_to(branch)?;
        state.index_mut().clear();

        self.persist_state(&state)
    }
}
