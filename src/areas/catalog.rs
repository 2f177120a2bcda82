//! Commit catalog
//!
//! Every commit this repository knows about, with two lookup indexes:
//! - short ids: the first six hex characters of each id
//! - messages: exact message text to the ids carrying it
//!
//! Short-id collisions are not detected; the commit registered last wins.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::SHORT_ID_LENGTH;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitCatalog {
    commits: BTreeSet<ObjectId>,
    short_ids: BTreeMap<String, ObjectId>,
    messages: BTreeMap<String, Vec<ObjectId>>,
}

impl CommitCatalog {
    pub fn from_parts(
        commits: BTreeSet<ObjectId>,
        short_ids: BTreeMap<String, ObjectId>,
        messages: BTreeMap<String, Vec<ObjectId>>,
    ) -> Self {
        CommitCatalog {
            commits,
            short_ids,
            messages,
        }
    }

    /// Index a commit; registering the same commit twice is a no-op
    pub fn register(&mut self, commit: &Commit) {
        let oid = commit.object_id();
        if !self.commits.insert(oid.clone()) {
            return;
        }

        self.short_ids
            .insert(oid.short_prefix().to_string(), oid.clone());
        self.messages
            .entry(commit.message().to_string())
            .or_default()
            .push(oid.clone());
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.commits.contains(oid)
    }

    /// Resolve a full id or a prefix of at least six characters
    pub fn resolve(&self, id: &str) -> anyhow::Result<ObjectId> {
        let unknown = || TwigError::UnknownOrAmbiguousCommitId(id.to_string());
        let id = id.to_ascii_lowercase();

        if id.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(id.clone()).map_err(|_| unknown())?;
            return if self.commits.contains(&oid) {
                Ok(oid)
            } else {
                Err(unknown().into())
            };
        }

        if id.len() < SHORT_ID_LENGTH || !id.is_char_boundary(SHORT_ID_LENGTH) {
            return Err(unknown().into());
        }

        self.short_ids
            .get(&id[..SHORT_ID_LENGTH])
            .filter(|oid| oid.as_ref().starts_with(&id))
            .cloned()
            .ok_or_else(|| unknown().into())
    }

    pub fn find_by_message(&self, message: &str) -> anyhow::Result<&[ObjectId]> {
        self.messages
            .get(message)
            .filter(|ids| !ids.is_empty())
            .map(Vec::as_slice)
            .ok_or_else(|| TwigError::NoCommitWithMessage.into())
    }

    pub fn commits(&self) -> &BTreeSet<ObjectId> {
        &self.commits
    }

    pub fn short_ids(&self) -> &BTreeMap<String, ObjectId> {
        &self.short_ids
    }

    pub fn messages(&self) -> &BTreeMap<String, Vec<ObjectId>> {
        &self.messages
    }
}
