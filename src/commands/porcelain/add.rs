use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;

impl Repository {
    /// Stage the current content of a file
    ///
    /// Content equal to HEAD's version cancels any pending change instead.
    pub fn add(&self, filename: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let head = self.head_commit(&state)?;

        let blob = self.workspace().parse_blob(filename)?;

        if head.blob_id(filename) == Some(blob.object_id()) {
            state.index_mut().unstage(filename);
        } else {
            self.database().store(&blob)?;
            state
                .index_mut()
                .stage_addition(filename, blob.object_id().clone());
        }

        self.persist_state(&state)
    }
}
