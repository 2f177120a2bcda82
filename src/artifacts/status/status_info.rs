//! Status sections
//!
//! ```text
//! === Branches ===
//! *master
//! other-branch
//!
//! === Staged Files ===
//! wug.txt
//!
//! === Removed Files ===
//! goodbye.txt
//!
//! === Modifications Not Staged For Commit ===
//! junk.txt (deleted)
//! wug3.txt (modified)
//!
//! === Untracked Files ===
//! random.stuff
//!
//! ```
//!
//! Every section is sorted by name.

use crate::areas::index::Index;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use colored::Colorize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    /// Branch names, flagged when current
    pub branches: Vec<(String, bool)>,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<(String, WorkspaceChangeType)>,
    pub untracked: Vec<String>,
}

impl StatusInfo {
    /// Compare the working directory with HEAD and the staging area
    ///
    /// # Arguments
    ///
    /// * `branches` - Branch names and whether each is current
    /// * `head_files` - Files tracked by HEAD
    /// * `index` - Staged changes
    /// * `working` - Files in the working directory with the blob id of their content
    pub fn compute(
        branches: Vec<(String, bool)>,
        head_files: &BTreeMap<String, ObjectId>,
        index: &Index,
        working: &BTreeMap<String, ObjectId>,
    ) -> Self {
        let mut modified = BTreeMap::new();

        for (filename, head_oid) in head_files {
            if index.is_staged_for_addition(filename) || index.is_staged_for_removal(filename) {
                continue;
            }
            if let Some(change) = Self::compare(head_oid, working.get(filename)) {
                modified.insert(filename.clone(), change);
            }
        }
        for (filename, staged_oid) in index.added() {
            if let Some(change) = Self::compare(staged_oid, working.get(filename)) {
                modified.insert(filename.clone(), change);
            }
        }

        let untracked = working
            .keys()
            .filter(|filename| {
                !head_files.contains_key(*filename) && !index.is_staged_for_addition(filename)
            })
            .cloned()
            .collect();

        StatusInfo {
            branches,
            staged: index.added().keys().cloned().collect(),
            removed: index.removed().iter().cloned().collect(),
            modified: modified.into_iter().collect(),
            untracked,
        }
    }

    fn compare(
        tracked: &ObjectId,
        working: Option<&ObjectId>,
    ) -> Option<WorkspaceChangeType> {
        match working {
            None => Some(WorkspaceChangeType::Deleted),
            Some(working) if working != tracked => Some(WorkspaceChangeType::Modified),
            Some(_) => None,
        }
    }
}

impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for (name, current) in &self.branches {
            if *current {
                writeln!(f, "*{}", name.green())?;
            } else {
                writeln!(f, "{}", name)?;
            }
        }

        writeln!(f, "\n=== Staged Files ===")?;
        for filename in &self.staged {
            writeln!(f, "{}", filename.green())?;
        }

        writeln!(f, "\n=== Removed Files ===")?;
        for filename in &self.removed {
            writeln!(f, "{}", filename.green())?;
        }

        writeln!(f, "\n=== Modifications Not Staged For Commit ===")?;
        for (filename, change) in &self.modified {
            writeln!(f, "{} {}", filename.red(), change)?;
        }

        writeln!(f, "\n=== Untracked Files ===")?;
        for filename in &self.untracked {
            writeln!(f, "{}", filename.red())?;
        }

        writeln!(f)
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
    fn head_files() -> BTreeMap<String, ObjectId> {
        BTreeMap::from([
            ("kept.txt".to_string(), oid('1')),
            ("edited.txt".to_string(), oid('2')),
            ("vanished.txt".to_string(), oid('3')),
            ("removed.txt".to_string(), oid('4')),
        ])
    }

    #[rstest]
    fn sections_are_filled_from_each_area(head_files: BTreeMap<String, ObjectId>) {
        let mut index = Index::default();
        index.stage_addition("new.txt", oid('5'));
        index.stage_addition("restaged.txt", oid('6'));
        index.stage_removal("removed.txt");

        let working = BTreeMap::from([
            ("kept.txt".to_string(), oid('1')),
            ("edited.txt".to_string(), oid('a')),
            ("new.txt".to_string(), oid('5')),
            ("removed.txt".to_string(), oid('4')),
            ("stray.txt".to_string(), oid('b')),
        ]);

        let status = StatusInfo::compute(
            vec![("master".to_string(), true), ("side".to_string(), false)],
            &head_files,
            &index,
            &working,
        );

        assert_eq!(status.staged, vec!["new.txt", "restaged.txt"]);
        assert_eq!(status.removed, vec!["removed.txt"]);
        assert_eq!(
            status.modified,
            vec![
                ("edited.txt".to_string(), WorkspaceChangeType::Modified),
                ("restaged.txt".to_string(), WorkspaceChangeType::Deleted),
                ("vanished.txt".to_string(), WorkspaceChangeType::Deleted),
            ]
        );
        assert_eq!(status.untracked, vec!["stray.txt"]);
    }

    #[rstest]
    fn recreated_removed_file_is_only_listed_as_removed(head_files: BTreeMap<String, ObjectId>) {
        let mut index = Index::default();
        index.stage_removal("removed.txt");
        let mut working = head_files.clone();
        working.insert("removed.txt".to_string(), oid('c'));

        let status = StatusInfo::compute(vec![], &head_files, &index, &working);

        assert_eq!(status.removed, vec!["removed.txt"]);
        assert!(status.untracked.is_empty());
        assert!(status.modified.is_empty());
    }

    #[rstest]
    fn rendering_marks_the_current_branch(head_files: BTreeMap<String, ObjectId>) {
        colored::control::set_override(false);
        let working = head_files.clone();
        let status = StatusInfo::compute(
            vec![("master".to_string(), true), ("side".to_string(), false)],
            &head_files,
            &Index::default(),
            &working,
        );

        assert!(status.staged.is_empty() && status.modified.is_empty());
        assert_eq!(
            status.to_string(),
            "=== Branches ===\n*master\nside\n\n=== Staged Files ===\n\n=== Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n=== Untracked Files ===\n\n"
        );
    }
}
