//! Repository state
//!
//! The explicit value every command loads at start and persists at the end: refs,
//! the commit catalog, remotes and the staging area. Persisting rewrites the whole
//! record through a temp file, so a failed command leaves the previous record intact.

use crate::areas::catalog::CommitCatalog;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::state::checksum::Checksum;
use crate::artifacts::state::state_header::StateHeader;
use crate::artifacts::state::{HEADER_SIZE, SIGNATURE, VERSION};
use anyhow::Context;
use fake::rand;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    refs: Refs,
    catalog: CommitCatalog,
    /// Remote name mapped to the path of the remote's `.twig` directory
    remotes: BTreeMap<String, PathBuf>,
    index: Index,
}

impl RepositoryState {
    /// State of a freshly initialized repository holding only `root`
    pub fn initial(root: &Commit) -> Self {
        let mut catalog = CommitCatalog::default();
        catalog.register(root);

        RepositoryState {
            refs: Refs::new(root.object_id().clone()),
            catalog,
            remotes: BTreeMap::new(),
            index: Index::default(),
        }
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn refs_mut(&mut self) -> &mut Refs {
        &mut self.refs
    }

    pub fn catalog(&self) -> &CommitCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CommitCatalog {
        &mut self.catalog
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn remotes(&self) -> &BTreeMap<String, PathBuf> {
        &self.remotes
    }

    pub fn remote(&self, name: &str) -> anyhow::Result<&Path> {
        self.remotes
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| TwigError::RemoteNotFound(name.to_string()).into())
    }

    pub fn add_remote(&mut self, name: &str, path: PathBuf) -> anyhow::Result<()> {
        if self.remotes.contains_key(name) {
            return Err(TwigError::RemoteAlreadyExists(name.to_string()).into());
        }

        self.remotes.insert(name.to_string(), path);
        Ok(())
    }

    pub fn remove_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.remotes
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| TwigError::RemoteNotFound(name.to_string()).into())
    }

    /// Read the state record
    ///
    /// Fails with `NotInitialized` when there is no record and with
    /// `CorruptedState` when its signature, version or checksum is wrong.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Err(TwigError::NotInitialized.into());
        }

        let state_file = std::fs::File::open(path)
            .context(format!("Unable to open state file {}", path.display()))?;
        let record_size = state_file.metadata()?.len();
        let mut reader = Checksum::with_limit(BufReader::new(state_file), record_size);

        Self::parse_header(&mut reader)?;

        let current = reader.read_string()?;
        let mut branches = BTreeMap::new();
        for _ in 0..reader.read_u32()? {
            let name = reader.read_string()?;
            branches.insert(name, reader.read_oid()?);
        }

        let mut commits = BTreeSet::new();
        for _ in 0..reader.read_u32()? {
            commits.insert(reader.read_oid()?);
        }
        let mut short_ids = BTreeMap::new();
        for _ in 0..reader.read_u32()? {
            let prefix = reader.read_string()?;
            short_ids.insert(prefix, reader.read_oid()?);
        }
        let mut messages = BTreeMap::new();
        for _ in 0..reader.read_u32()? {
            let message = reader.read_string()?;
            let ids = (0..reader.read_u32()?)
                .map(|_| reader.read_oid())
                .collect::<anyhow::Result<Vec<_>>>()?;
            messages.insert(message, ids);
        }

        let mut remotes = BTreeMap::new();
        for _ in 0..reader.read_u32()? {
            let name = reader.read_string()?;
            remotes.insert(name, PathBuf::from(reader.read_string()?));
        }

        let mut added = BTreeMap::new();
        for _ in 0..reader.read_u32()? {
            let filename = reader.read_string()?;
            added.insert(filename, reader.read_oid()?);
        }
        let mut removed = BTreeSet::new();
        for _ in 0..reader.read_u32()? {
            removed.insert(reader.read_string()?);
        }

        reader.verify()?;

        Ok(RepositoryState {
            refs: Refs::from_parts(current, branches)?,
            catalog: CommitCatalog::from_parts(commits, short_ids, messages),
            remotes,
            index: Index::from_parts(added, removed),
        })
    }

    fn parse_header<S: std::io::Read>(reader: &mut Checksum<S>) -> anyhow::Result<()> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = StateHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(TwigError::CorruptedState("invalid state file signature".to_string()).into());
        }
        if header.version != VERSION {
            return Err(TwigError::CorruptedState(format!(
                "unsupported state file version: {}",
                header.version
            ))
            .into());
        }

        Ok(())
    }

    /// Write the whole record to `path`
    pub fn persist(&self, path: &Path) -> anyhow::Result<()> {
        let state_dir = path
            .parent()
            .context(format!("Invalid state path {}", path.display()))?;
        let temp_path = state_dir.join(format!("tmp-state-{}", rand::random::<u32>()));

        let state_file = std::fs::File::create(&temp_path)
            .context(format!("Unable to create state file {}", temp_path.display()))?;
        let mut writer = Checksum::new(BufWriter::new(state_file));

        writer.write(&StateHeader::default().serialize()?)?;

        writer.write_string(self.refs.current_branch())?;
        writer.write_u32(Self::count(self.refs.branches().len())?)?;
        for (name, head) in self.refs.branches() {
            writer.write_string(name)?;
            writer.write_oid(head)?;
        }

        writer.write_u32(Self::count(self.catalog.commits().len())?)?;
        for oid in self.catalog.commits() {
            writer.write_oid(oid)?;
        }
        writer.write_u32(Self::count(self.catalog.short_ids().len())?)?;
        for (prefix, oid) in self.catalog.short_ids() {
            writer.write_string(prefix)?;
            writer.write_oid(oid)?;
        }
        writer.write_u32(Self::count(self.catalog.messages().len())?)?;
        for (message, ids) in self.catalog.messages() {
            writer.write_string(message)?;
            writer.write_u32(Self::count(ids.len())?)?;
            for oid in ids {
                writer.write_oid(oid)?;
            }
        }

        writer.write_u32(Self::count(self.remotes.len())?)?;
        for (name, remote_path) in &self.remotes {
            writer.write_string(name)?;
            writer.write_string(&remote_path.to_string_lossy())?;
        }

        writer.write_u32(Self::count(self.index.added().len())?)?;
        for (filename, oid) in self.index.added() {
            writer.write_string(filename)?;
            writer.write_oid(oid)?;
        }
        writer.write_u32(Self::count(self.index.removed().len())?)?;
        for filename in self.index.removed() {
            writer.write_string(filename)?;
        }

        writer.write_checksum()?;
        writer
            .into_inner()
            .into_inner()
            .map_err(|error| error.into_error())?
            .flush()?;

        std::fs::rename(&temp_path, path)
            .context(format!("Unable to rename state file to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "persisted repository state");

        Ok(())
    }

    fn count(length: usize) -> anyhow::Result<u32> {
        u32::try_from(length).context("Too many entries in state section")
    }
}
