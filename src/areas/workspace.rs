//! Working directory access
//!
//! Twig tracks a flat set of plain files in the repository root. Directories and
//! dotfiles (including `.twig` itself) are never listed.

use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::blob::{Blob, is_storable_name};
use crate::artifacts::objects::commit::is_dotfile;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Plain, non-hidden files directly in the repository root
    ///
    /// Names that cannot be recorded in a commit are left out.
    pub fn list_files(&self) -> anyhow::Result<BTreeSet<String>> {
        let mut files = BTreeSet::new();

        for entry in WalkDir::new(&self.path).min_depth(1).max_depth(1) {
            let entry = entry.context(format!(
                "Unable to list working directory {}",
                self.path.display()
            ))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().to_string();
            if !is_dotfile(&filename) && is_storable_name(&filename) {
                files.insert(filename);
            }
        }

        Ok(files)
    }

    pub fn read_file(&self, filename: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(filename);
        if !file_path.is_file() {
            return Err(TwigError::FileNotFoundInWorkingCopy(filename.to_string()).into());
        }

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    /// Snapshot the current content of a file
    pub fn parse_blob(&self, filename: &str) -> anyhow::Result<Blob> {
        Blob::new(filename, self.read_file(filename)?)
    }

    pub fn write_file(&self, filename: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(filename);

        std::fs::write(&file_path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete a file; a file that is already gone is fine
    pub fn remove_file(&self, filename: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(filename);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        Ok(())
    }

    /// Apply a planned migration
    ///
    /// Deletions first, then additions and overwrites, with blob content fetched
    /// through `load_blob`.
    pub fn apply_migration(
        &self,
        migration: &Migration,
        load_blob: impl Fn(&ObjectId) -> anyhow::Result<Blob>,
    ) -> anyhow::Result<()> {
        for (filename, _) in migration.actions_of(ActionType::Delete) {
            self.remove_file(filename)?;
        }

        for action in [ActionType::Add, ActionType::Modify] {
            for (filename, oid) in migration.actions_of(action) {
                let oid = oid
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("Missing blob for {}", filename))?;
                let blob = load_blob(oid)?;
                self.write_file(filename, blob.content())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_skips_directories_and_dotfiles() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("a.txt").write_str("a")?;
        dir.child(".hidden").write_str("h")?;
        dir.child("nested").child("b.txt").write_str("b")?;
        dir.child(".twig").create_dir_all()?;

        let workspace = Workspace::new(dir.path().into());

        assert_eq!(
            workspace.list_files()?,
            BTreeSet::from(["a.txt".to_string()])
        );
        Ok(())
    }

    #[test]
    fn reading_a_missing_file_is_a_typed_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let workspace = Workspace::new(dir.path().into());

        let error = workspace.read_file("nope.txt").unwrap_err();
        assert_eq!(
            error.downcast_ref::<TwigError>(),
            Some(&TwigError::FileNotFoundInWorkingCopy("nope.txt".to_string()))
        );
        Ok(())
    }
}
