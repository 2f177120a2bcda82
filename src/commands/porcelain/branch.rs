use crate::areas::repository::Repository;

impl Repository {
    /// Create a branch at HEAD without switching to it
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let head = state.refs().head()?.clone();
        state.refs_mut().create_branch(name, head)?;

        self.persist_state(&state)
    }

    /// Delete a branch pointer; its commits stay in the store
    pub fn remove_branch(&self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        state.refs_mut().delete_branch(name)?;

        self.persist_state(&state)
    }
}
