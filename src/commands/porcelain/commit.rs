use crate::areas::repository::Repository;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        let mut state = self.load_state()?;

        if message.trim().is_empty() {
            return Err(TwigError::EmptyCommitMessage.into());
        }
        if state.index().is_empty() {
            return Err(TwigError::NothingStagedToCommit.into());
        }

        let parent = state.refs().head()?.clone();
        let commit = self.write_commit(&mut state, message.to_string(), vec![parent])?;
        self.persist_state(&state)?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            state.refs().current_branch(),
            commit.object_id().short_prefix(),
            commit.message()
        )?;

        Ok(commit.object_id().clone())
    }
}
