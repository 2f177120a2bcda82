//! Staging area
//!
//! Holds the pending changes for the next commit:
//! - `added`: file name mapped to the blob id of the staged content
//! - `removed`: file names scheduled to stop being tracked
//!
//! A file name is never in both sets at once.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    added: BTreeMap<String, ObjectId>,
    removed: BTreeSet<String>,
}

impl Index {
    pub fn from_parts(added: BTreeMap<String, ObjectId>, removed: BTreeSet<String>) -> Self {
        let mut index = Index::default();
        for (filename, oid) in added {
            index.stage_addition(&filename, oid);
        }
        for filename in removed {
            index.stage_removal(&filename);
        }
        index
    }

    /// Record new content for a file, cancelling a pending removal
    pub fn stage_addition(&mut self, filename: &str, oid: ObjectId) {
        self.removed.remove(filename);
        self.added.insert(filename.to_string(), oid);
    }

    /// Schedule a file to stop being tracked, cancelling a pending addition
    pub fn stage_removal(&mut self, filename: &str) {
        self.added.remove(filename);
        self.removed.insert(filename.to_string());
    }

    /// Drop every pending change for a file
    pub fn unstage(&mut self, filename: &str) -> bool {
        let was_added = self.added.remove(filename).is_some();
        let was_removed = self.removed.remove(filename);
        was_added || was_removed
    }

    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added(&self) -> &BTreeMap<String, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn is_staged_for_addition(&self, filename: &str) -> bool {
        self.added.contains_key(filename)
    }

    pub fn is_staged_for_removal(&self, filename: &str) -> bool {
        self.removed.contains(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn oid(seed: char) -> ObjectId {
        ObjectId::try_parse(seed.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn addition_and_removal_exclude_each_other() {
        let mut index = Index::default();

        index.stage_addition("a.txt", oid('1'));
        index.stage_removal("a.txt");
        assert!(!index.is_staged_for_addition("a.txt"));
        assert!(index.is_staged_for_removal("a.txt"));

        index.stage_addition("a.txt", oid('2'));
        assert_eq!(index.added().get("a.txt"), Some(&oid('2')));
        assert!(!index.is_staged_for_removal("a.txt"));
    }

    #[test]
    fn unstaging_drops_both_sides() {
        let mut index = Index::default();
        index.stage_addition("a.txt", oid('1'));
        index.stage_removal("b.txt");

        assert!(index.unstage("a.txt"));
        assert!(index.unstage("b.txt"));
        assert!(!index.unstage("c.txt"));
        assert!(index.is_empty());
    }
}
