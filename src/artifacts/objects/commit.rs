//! Commit object
//!
//! A commit is an immutable snapshot of the whole tracked-file set. It contains:
//! - A message and a timestamp
//! - Zero parents (root), one parent, or two parents (merge)
//! - The map from file name to blob id
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <version> <size>\0
//! id <commit-sha>
//! timestamp <unix-seconds> <timezone>
//! parent <parent-sha>
//! file <blob-sha> <filename>
//!
//! <commit message>
//! ```
//!
//! ## Id
//!
//! The id is not the hash of the record. It is the hash of the canonical string
//! `"commit" ‖ timestamp ‖ message ‖ parent1 ‖ parent2` followed by, for each tracked
//! blob in file name order, the blob content and then the file name.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, hash_parts};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Message of the commit every repository starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Human-readable timestamp format, e.g. "Thu Jan 1 00:00:00 1970 +0000"
const READABLE_TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

/// Slim representation of a commit
///
/// Contains only what graph walks need.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs, first parent first
    pub parents: Vec<ObjectId>,
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    oid: ObjectId,
    message: String,
    timestamp: DateTime<FixedOffset>,
    /// Parent commit IDs (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    /// Tracked files mapped to their blob ids
    files: BTreeMap<String, ObjectId>,
}

impl Commit {
    /// Create a new commit over the given tracked blobs
    ///
    /// Blobs whose file name starts with `.` are never tracked and are skipped.
    ///
    /// # Arguments
    ///
    /// * `message` - Commit message
    /// * `timestamp` - Commit time
    /// * `parents` - Parent commit IDs, at most two
    /// * `blobs` - Every blob the new snapshot tracks
    pub fn new<'b>(
        message: String,
        timestamp: DateTime<FixedOffset>,
        parents: Vec<ObjectId>,
        blobs: impl IntoIterator<Item = &'b Blob>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(parents.len() <= 2, "A commit has at most two parents");

        let tracked = blobs
            .into_iter()
            .filter(|blob| !is_dotfile(blob.filename()))
            .map(|blob| (blob.filename(), blob))
            .collect::<BTreeMap<_, _>>();

        let oid = Self::canonical_id(&message, &timestamp, &parents, &tracked)?;
        let files = tracked
            .into_iter()
            .map(|(filename, blob)| (filename.to_string(), blob.object_id().clone()))
            .collect();

        Ok(Commit {
            oid,
            message,
            timestamp,
            parents,
            files,
        })
    }

    /// The parentless commit created by `init`
    pub fn root() -> anyhow::Result<Self> {
        let epoch = FixedOffset::east_opt(0)
            .context("Invalid epoch offset")?
            .timestamp_opt(0, 0)
            .single()
            .context("Invalid epoch timestamp")?;

        Self::new(ROOT_COMMIT_MESSAGE.to_string(), epoch, vec![], Vec::<&Blob>::new())
    }

    /// Recompute the id from the stored fields
    ///
    /// # Arguments
    ///
    /// * `load_blob` - Function loading a tracked blob by id
    pub fn recompute_id(
        &self,
        load_blob: impl Fn(&ObjectId) -> anyhow::Result<Blob>,
    ) -> anyhow::Result<ObjectId> {
        let blobs = self
            .files
            .values()
            .map(load_blob)
            .collect::<anyhow::Result<Vec<_>>>()?;
        let tracked = blobs
            .iter()
            .map(|blob| (blob.filename(), blob))
            .collect::<BTreeMap<_, _>>();

        Self::canonical_id(&self.message, &self.timestamp, &self.parents, &tracked)
    }

    fn canonical_id(
        message: &str,
        timestamp: &DateTime<FixedOffset>,
        parents: &[ObjectId],
        tracked: &BTreeMap<&str, &Blob>,
    ) -> anyhow::Result<ObjectId> {
        let timestamp = timestamp.format(READABLE_TIMESTAMP_FORMAT).to_string();
        let parent1 = parents.first().map(|oid| oid.as_ref()).unwrap_or_default();
        let parent2 = parents.get(1).map(|oid| oid.as_ref()).unwrap_or_default();

        let mut parts: Vec<&[u8]> = vec![
            b"commit".as_slice(),
            timestamp.as_bytes(),
            message.as_bytes(),
            parent1.as_bytes(),
            parent2.as_bytes(),
        ];
        // BTreeMap iteration keeps the file name order
        for (filename, blob) in tracked {
            parts.push(blob.content());
            parts.push(filename.as_bytes());
        }

        hash_parts(parts)
    }

    /// Get the full commit message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(READABLE_TIMESTAMP_FORMAT).to_string()
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn files(&self) -> &BTreeMap<String, ObjectId> {
        &self.files
    }

    pub fn blob_id(&self, filename: &str) -> Option<&ObjectId> {
        self.files.get(filename)
    }

    pub fn tracks(&self, filename: &str) -> bool {
        self.files.contains_key(filename)
    }

    pub fn slim(&self) -> SlimCommit {
        SlimCommit {
            oid: self.oid.clone(),
            parents: self.parents.clone(),
        }
    }
}

/// Whether a file name is excluded from every snapshot
pub fn is_dotfile(filename: &str) -> bool {
    filename.starts_with('.')
}

/// Timestamp for a new commit
///
/// Reads TWIG_COMMIT_DATE (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls back to
/// the current local time.
pub fn timestamp_from_env() -> anyhow::Result<DateTime<FixedOffset>> {
    match std::env::var(COMMIT_DATE_ENV) {
        Ok(date_str) => DateTime::parse_from_rfc2822(&date_str)
            .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
            .with_context(|| format!("{} is not a valid date: {}", COMMIT_DATE_ENV, date_str)),
        Err(_) => Ok(chrono::Local::now().fixed_offset()),
    }
}

fn parse_stored_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, timezone) = value
        .split_once(' ')
        .context("Invalid commit object: malformed timestamp")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid commit object: invalid timestamp")?;

    anyhow::ensure!(
        timezone.len() == 5,
        "Invalid commit object: invalid timezone {}",
        timezone
    );
    let sign = match &timezone[..1] {
        "+" => 1,
        "-" => -1,
        _ => anyhow::bail!("Invalid commit object: invalid timezone {}", timezone),
    };
    let hours = timezone[1..3].parse::<i32>()?;
    let minutes = timezone[3..5].parse::<i32>()?;
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .context("Invalid commit object: timezone out of range")?;

    offset
        .timestamp_opt(seconds, 0)
        .single()
        .context("Invalid commit object: timestamp out of range")
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        object_content.push(format!("id {}", self.oid.as_ref()));
        object_content.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        for (filename, blob_oid) in &self.files {
            object_content.push(format!("file {} {}", blob_oid.as_ref(), filename));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut content_bytes = Vec::new();
        content_bytes.write_all(object_content.as_bytes())?;

        let mut commit_bytes = Vec::new();
        commit_bytes.write_all(self.object_type().header(content_bytes.len()).as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = header.lines();

        let oid = lines
            .next()
            .and_then(|line| line.strip_prefix("id "))
            .context("Invalid commit object: missing id line")?;
        let oid = ObjectId::try_parse(oid.to_string())?;

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = parse_stored_timestamp(timestamp)?;

        let mut parents = Vec::new();
        let mut files = BTreeMap::new();
        for line in lines {
            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (blob_oid, filename) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                files.insert(
                    filename.to_string(),
                    ObjectId::try_parse(blob_oid.to_string())?,
                );
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        Ok(Commit {
            oid,
            message: message.to_string(),
            timestamp,
            parents,
            files,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn object_id(&self) -> &ObjectId {
        &self.oid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::collections::HashMap;
    use std::io::Cursor;

    #[fixture]
    fn timestamp() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc2822("Tue, 1 Jul 2025 10:52:37 +0200").unwrap()
    }

    #[fixture]
    fn blobs() -> Vec<Blob> {
        vec![
            Blob::new("b.txt", "bee").unwrap(),
            Blob::new("a.txt", "ay").unwrap(),
        ]
    }

    #[rstest]
    fn id_does_not_depend_on_blob_order(timestamp: DateTime<FixedOffset>, blobs: Vec<Blob>) {
        let forward = Commit::new("m".to_string(), timestamp, vec![], &blobs).unwrap();
        let backward = Commit::new("m".to_string(), timestamp, vec![], blobs.iter().rev()).unwrap();

        assert_eq!(forward.object_id(), backward.object_id());
    }

    #[rstest]
    fn id_changes_with_the_message(timestamp: DateTime<FixedOffset>, blobs: Vec<Blob>) {
        let first = Commit::new("one".to_string(), timestamp, vec![], &blobs).unwrap();
        let second = Commit::new("two".to_string(), timestamp, vec![], &blobs).unwrap();

        assert_ne!(first.object_id(), second.object_id());
    }

    #[rstest]
    fn dotfiles_are_never_tracked(timestamp: DateTime<FixedOffset>, mut blobs: Vec<Blob>) {
        blobs.push(Blob::new(".secret", "hidden").unwrap());
        let commit = Commit::new("m".to_string(), timestamp, vec![], &blobs).unwrap();

        assert_eq!(
            commit.files().keys().cloned().collect::<Vec<_>>(),
            vec!["a.txt".to_string(), "b.txt".to_string()]
        );
    }

    #[rstest]
    fn stored_record_reproduces_the_id(
        timestamp: DateTime<FixedOffset>,
        blobs: Vec<Blob>,
    ) -> anyhow::Result<()> {
        let root = Commit::root()?;
        let commit = Commit::new(
            "first\n\nwith a body".to_string(),
            timestamp,
            vec![root.object_id().clone()],
            &blobs,
        )?;

        let mut reader = Cursor::new(commit.serialize()?);
        ObjectType::parse_object_header(&mut reader)?;
        let restored = Commit::deserialize(reader)?;
        assert_eq!(restored, commit);

        let by_id = blobs
            .iter()
            .map(|blob| (blob.object_id().clone(), blob.clone()))
            .collect::<HashMap<_, _>>();
        let recomputed = restored.recompute_id(|oid| {
            by_id
                .get(oid)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("missing blob {}", oid))
        })?;
        assert_eq!(&recomputed, commit.object_id());
        Ok(())
    }

    #[test]
    fn root_commit_is_fixed() -> anyhow::Result<()> {
        let root = Commit::root()?;

        assert_eq!(root.object_id(), Commit::root()?.object_id());
        assert_eq!(root.message(), ROOT_COMMIT_MESSAGE);
        assert_eq!(root.readable_timestamp(), "Thu Jan 1 00:00:00 1970 +0000");
        assert!(root.parents().is_empty());
        Ok(())
    }
}
