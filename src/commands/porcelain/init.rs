use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.state_path().exists() {
            return Err(TwigError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.twig_path()).context("Failed to create .twig directory")?;
        self.database()
            .init()
            .context("Failed to create .twig/objects directory")?;

        let root = Commit::root()?;
        self.database().store(&root)?;
        self.persist_state(&RepositoryState::initial(&root))
            .context("Failed to write initial repository state")?;

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.twig_path().display()
        )?;

        Ok(())
    }
}
