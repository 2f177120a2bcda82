use crate::areas::repository::Repository;
use crate::artifacts::core::error::TwigError;

impl Repository {
    /// Unstage a file and, when HEAD tracks it, stage its removal and delete it
    pub fn remove(&self, filename: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let head = self.head_commit(&state)?;

        let tracked_by_head = head.tracks(filename);
        if !tracked_by_head && !state.index().is_staged_for_addition(filename) {
            return Err(TwigError::NothingToRemove(filename.to_string()).into());
        }

        state.index_mut().unstage(filename);
        if tracked_by_head {
            state.index_mut().stage_removal(filename);
            self.workspace().remove_file(filename)?;
        }

        self.persist_state(&state)
    }
}
