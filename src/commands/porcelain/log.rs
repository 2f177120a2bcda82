use crate::areas::repository::Repository;
use crate::artifacts::log::LogEntry;
use crate::artifacts::log::rev_list::RevList;
use std::io::Write;

impl Repository {
    /// First-parent history of the current branch
    pub fn log(&self) -> anyhow::Result<()> {
        let state = self.load_state()?;
        let head = state.refs().head()?.clone();

        for commit in RevList::new(self.database(), head) {
            let commit = commit?;
            writeln!(self.writer(), "{}", LogEntry::new(&commit))?;
        }

        Ok(())
    }

    /// Every commit the repository knows, in id order
    pub fn global_log(&self) -> anyhow::Result<()> {
        let state = self.load_state()?;

        for commit_oid in state.catalog().commits() {
            let commit = self.database().load_commit(commit_oid)?;
            writeln!(self.writer(), "{}", LogEntry::new(&commit))?;
        }

        Ok(())
    }

    /// Print the id of every commit carrying exactly this message
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let state = self.load_state()?;

        for commit_oid in state.catalog().find_by_message(message)? {
            writeln!(self.writer(), "{}", commit_oid)?;
        }

        Ok(())
    }
}
