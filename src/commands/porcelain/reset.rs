use crate::areas::repository::Repository;

impl Repository {
    /// Move the current branch to a commit and check out its whole snapshot
    pub fn reset(&self, commit_id: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let target_oid = state.catalog().resolve(commit_id)?;
        let target = self.database().load_commit(&target_oid)?;
        let migration = self.plan_checkout(&state, &target)?;

        self.apply_migration(&migration)?;
        state.refs_mut().update_head(target_oid);
        state.index_mut().clear();

        self.persist_state(&state)
    }
}
