//! Checkout migration planning
//!
//! Moving the working tree from the current snapshot to a target snapshot:
//!
//! 1. Every file the target tracks is written (added or overwritten)
//! 2. Every file currently tracked (by HEAD or staged) that the target lacks is deleted
//! 3. Untracked files are never deleted
//!
//! ## Safety
//!
//! An untracked file whose name the target tracks would be silently overwritten, so
//! planning fails with `UntrackedFileWouldBeOverwritten` before anything is touched.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Overwrite existing file
    Modify,
}

/// Planned actions grouped by type
pub type ActionsSet = BTreeMap<ActionType, Vec<(String, Option<ObjectId>)>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    actions: ActionsSet,
}

impl Migration {
    /// Plan the move to `target`
    ///
    /// # Arguments
    ///
    /// * `tracked` - Files tracked by HEAD or staged for addition
    /// * `target` - Snapshot to materialize, file name to blob id
    /// * `present` - Files currently in the working directory
    pub fn plan(
        tracked: &BTreeSet<String>,
        target: &BTreeMap<String, ObjectId>,
        present: &BTreeSet<String>,
    ) -> anyhow::Result<Self> {
        ensure_no_untracked_overwrite(tracked, target.keys(), present)?;

        let mut actions = ActionsSet::new();
        for (filename, oid) in target {
            let action = if present.contains(filename) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            actions
                .entry(action)
                .or_default()
                .push((filename.clone(), Some(oid.clone())));
        }

        for filename in tracked {
            if !target.contains_key(filename) && present.contains(filename) {
                actions
                    .entry(ActionType::Delete)
                    .or_default()
                    .push((filename.clone(), None));
            }
        }

        Ok(Migration { actions })
    }

    pub fn actions_of(&self, action: ActionType) -> &[(String, Option<ObjectId>)] {
        self.actions.get(&action).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Fail if any of `written` is an untracked file in the working directory
pub fn ensure_no_untracked_overwrite<'f>(
    tracked: &BTreeSet<String>,
    written: impl IntoIterator<Item = &'f String>,
    present: &BTreeSet<String>,
) -> anyhow::Result<()> {
    match written
        .into_iter()
        .find(|filename| present.contains(*filename) && !tracked.contains(*filename))
    {
        Some(filename) => Err(TwigError::UntrackedFileWouldBeOverwritten(filename.clone()).into()),
        None => Ok(()),
    }
}
