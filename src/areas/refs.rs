//! Branch references
//!
//! A branch is a name pointing at a commit id. Exactly one branch is current; its
//! head is HEAD. Remote-tracking branches created by fetch are ordinary entries
//! named `<remote>/<branch>`.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Name of the branch every repository starts on
pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refs {
    /// Name of the checked-out branch
    current: String,
    /// Every branch and its head commit
    branches: BTreeMap<String, ObjectId>,
}

impl Refs {
    /// Start a fresh branch table with the default branch at `root`
    pub fn new(root: ObjectId) -> Self {
        Refs {
            current: DEFAULT_BRANCH.to_string(),
            branches: BTreeMap::from([(DEFAULT_BRANCH.to_string(), root)]),
        }
    }

    /// Rebuild from persisted parts, rejecting a current branch without a head
    pub fn from_parts(
        current: String,
        branches: BTreeMap<String, ObjectId>,
    ) -> anyhow::Result<Self> {
        if !branches.contains_key(&current) {
            return Err(TwigError::CorruptedState(format!(
                "current branch {} has no head",
                current
            ))
            .into());
        }

        Ok(Refs { current, branches })
    }

    pub fn current_branch(&self) -> &str {
        &self.current
    }

    pub fn is_current_branch(&self, name: &str) -> bool {
        self.current == name
    }

    /// Head commit of the current branch
    pub fn head(&self) -> anyhow::Result<&ObjectId> {
        self.branch(&self.current)
    }

    pub fn branch(&self, name: &str) -> anyhow::Result<&ObjectId> {
        self.branches
            .get(name)
            .ok_or_else(|| TwigError::UnknownBranch(name.to_string()).into())
    }

    pub fn branches(&self) -> &BTreeMap<String, ObjectId> {
        &self.branches
    }

    pub fn create_branch(&mut self, name: &str, head: ObjectId) -> anyhow::Result<()> {
        if self.branches.contains_key(name) {
            return Err(TwigError::BranchAlreadyExists(name.to_string()).into());
        }

        self.branches.insert(name.to_string(), head);
        Ok(())
    }

    pub fn delete_branch(&mut self, name: &str) -> anyhow::Result<ObjectId> {
        if !self.branches.contains_key(name) {
            return Err(TwigError::UnknownBranch(name.to_string()).into());
        }
        if self.is_current_branch(name) {
            return Err(TwigError::CannotRemoveCurrentBranch.into());
        }

        self.branches
            .remove(name)
            .ok_or_else(|| TwigError::UnknownBranch(name.to_string()).into())
    }

    /// Point `name` at `head`, creating the branch when missing
    pub fn update_branch(&mut self, name: &str, head: ObjectId) {
        tracing::debug!(branch = name, %head, "moving branch");
        self.branches.insert(name.to_string(), head);
    }

    /// Move the current branch to `head`
    pub fn update_head(&mut self, head: ObjectId) {
        let current = self.current.clone();
        self.update_branch(&current, head);
    }

    pub fn switch_to(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.branches.contains_key(name) {
            return Err(TwigError::UnknownBranch(name.to_string()).into());
        }

        self.current = name.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn oid(seed: char) -> ObjectId {
        ObjectId::try_parse(seed.to_string().repeat(40)).unwrap()
    }

    #[fixture]
    fn refs() -> Refs {
        Refs::new(oid('a'))
    }

    #[rstest]
    fn starts_on_the_default_branch(refs: Refs) -> anyhow::Result<()> {
        assert_eq!(refs.current_branch(), DEFAULT_BRANCH);
        assert_eq!(refs.head()?, &oid('a'));
        Ok(())
    }

    #[rstest]
    fn duplicate_branches_are_rejected(mut refs: Refs) {
        let error = refs.create_branch(DEFAULT_BRANCH, oid('b')).unwrap_err();

        assert_eq!(
            error.downcast_ref::<TwigError>(),
            Some(&TwigError::BranchAlreadyExists(DEFAULT_BRANCH.to_string()))
        );
    }

    #[rstest]
    fn the_current_branch_cannot_be_deleted(mut refs: Refs) {
        let error = refs.delete_branch(DEFAULT_BRANCH).unwrap_err();

        assert_eq!(
            error.downcast_ref::<TwigError>(),
            Some(&TwigError::CannotRemoveCurrentBranch)
        );
    }

    #[rstest]
    fn moving_head_only_touches_the_current_branch(mut refs: Refs) -> anyhow::Result<()> {
        refs.create_branch("topic", oid('a'))?;
        refs.update_head(oid('c'));

        assert_eq!(refs.head()?, &oid('c'));
        assert_eq!(refs.branch("topic")?, &oid('a'));
        Ok(())
    }

    #[rstest]
    fn deleting_a_branch_keeps_the_rest(mut refs: Refs) -> anyhow::Result<()> {
        refs.create_branch("topic", oid('b'))?;

        assert_eq!(refs.delete_branch("topic")?, oid('b'));
        assert!(!refs.branches().contains_key("topic"));
        assert!(refs.branches().contains_key(DEFAULT_BRANCH));
        Ok(())
    }
}
