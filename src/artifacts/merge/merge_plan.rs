//! Per-file merge decisions
//!
//! For every file name in the split point S, the current head C and the given head
//! G, the blob ids on each side decide the outcome:
//!
//! | C vs G          | C vs S    | G vs S    | outcome                 |
//! |-----------------|-----------|-----------|-------------------------|
//! | equal           |           |           | nothing to do           |
//! | different       | unchanged | changed   | take G (write or delete)|
//! | different       | changed   | unchanged | keep C                  |
//! | different       | changed   | changed   | conflict                |
//!
//! A missing file counts as a side of its own, so "deleted in C, changed in G"
//! and "deleted in G, changed in C" are conflicts while "deleted in G, unchanged
//! in C" removes the file.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

/// What the merge does to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Check out the given side's blob and stage it
    TakeGiven(ObjectId),
    /// Delete the working copy and stage the removal
    Remove,
    /// Write conflict markers around both sides and stage the result
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: BTreeMap<String, FileAction>,
}

impl MergePlan {
    /// Decide the fate of every file across the three snapshots
    pub fn compute(
        split: &BTreeMap<String, ObjectId>,
        current: &BTreeMap<String, ObjectId>,
        given: &BTreeMap<String, ObjectId>,
    ) -> Self {
        let filenames = split
            .keys()
            .chain(current.keys())
            .chain(given.keys())
            .collect::<BTreeSet<_>>();

        let actions = filenames
            .into_iter()
            .filter_map(|filename| {
                let action = Self::decide(
                    split.get(filename),
                    current.get(filename),
                    given.get(filename),
                )?;
                tracing::debug!(file = %filename, ?action, "merge decision");
                Some((filename.clone(), action))
            })
            .collect();

        MergePlan { actions }
    }

    fn decide(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> Option<FileAction> {
        if current == given {
            return None;
        }

        if current == split {
            return Some(match given {
                Some(oid) => FileAction::TakeGiven(oid.clone()),
                None => FileAction::Remove,
            });
        }

        if given == split {
            return None;
        }

        Some(FileAction::Conflict {
            current: current.cloned(),
            given: given.cloned(),
        })
    }

    pub fn actions(&self) -> &BTreeMap<String, FileAction> {
        &self.actions
    }

    /// Files whose working copy the merge overwrites
    pub fn written_files(&self) -> impl Iterator<Item = &String> {
        self.actions
            .iter()
            .filter(|(_, action)| !matches!(action, FileAction::Remove))
            .map(|(filename, _)| filename)
    }

    pub fn conflicted_files(&self) -> Vec<String> {
        self.actions
            .iter()
            .filter(|(_, action)| matches!(action, FileAction::Conflict { .. }))
            .map(|(filename, _)| filename.clone())
            .collect()
    }
}
