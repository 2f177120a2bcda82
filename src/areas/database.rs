//! Content-addressable object store
//!
//! Blobs and commits live in separate sub-stores under `.twig/objects/`, each
//! sharded by the first two hex characters of the id. Records are zlib-compressed
//! and written through a temp file that is renamed into place. Storing is
//! idempotent and nothing is ever mutated or deleted.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Create the blob and commit sub-stores
    pub fn init(&self) -> anyhow::Result<()> {
        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            let store_path = self.path.join(object_type.store_dir());
            std::fs::create_dir_all(&store_path).context(format!(
                "Unable to create object directory {}",
                store_path.display()
            ))?;
        }

        Ok(())
    }

    /// Store an object unless a record with the same id already exists
    pub fn store(&self, object: &impl Object) -> anyhow::Result<()> {
        let object_path = self.path.join(object.object_path());

        if object_path.exists() {
            return Ok(());
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(&object_path, object.serialize()?)?;
        tracing::debug!(
            object_type = %object.object_type(),
            oid = %object.object_id(),
            "stored object"
        );

        Ok(())
    }

    pub fn has_commit(&self, oid: &ObjectId) -> bool {
        self.record_path(ObjectType::Commit, oid).exists()
    }

    pub fn has_blob(&self, oid: &ObjectId) -> bool {
        self.record_path(ObjectType::Blob, oid).exists()
    }

    /// Load a commit, checking that the record really holds the requested id
    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Commit, oid)?;
        let commit = Commit::deserialize(object_reader)?;

        if commit.object_id() != oid {
            anyhow::bail!(
                "Commit record {} holds mismatching id {}",
                oid,
                commit.object_id()
            );
        }

        Ok(commit)
    }

    /// Load a blob, checking that its content still hashes to the requested id
    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Blob, oid)?;
        let blob = Blob::deserialize(object_reader)?;

        if blob.object_id() != oid {
            anyhow::bail!("Blob record {} holds mismatching id {}", oid, blob.object_id());
        }

        Ok(blob)
    }

    fn record_path(&self, object_type: ObjectType, oid: &ObjectId) -> PathBuf {
        self.path.join(object_type.store_dir()).join(oid.to_path())
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self.record_path(expected_type, object_id);
        if !object_path.exists() {
            return Err(TwigError::ObjectNotFound(object_id.to_string()).into());
        }

        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_header(&mut object_reader)?;
        if object_type != expected_type {
            anyhow::bail!(
                "Object {} is a {}, expected a {}",
                object_id,
                object_type,
                expected_type
            );
        }

        Ok(object_reader)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // readers never observe a half-written record
        std::fs::rename(&temp_object_path, object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn database() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        database.init().unwrap();
        (dir, database)
    }

    #[rstest]
    fn storing_twice_keeps_one_record(database: (TempDir, Database)) -> anyhow::Result<()> {
        let (dir, database) = database;
        let blob = Blob::new("a.txt", "hello")?;

        database.store(&blob)?;
        database.store(&blob)?;

        let shard = dir
            .path()
            .join("objects")
            .join("blobs")
            .join(&blob.object_id().as_ref()[..2]);
        assert_eq!(std::fs::read_dir(shard)?.count(), 1);
        assert_eq!(database.load_blob(blob.object_id())?, blob);
        Ok(())
    }

    #[rstest]
    fn commits_and_blobs_live_apart(database: (TempDir, Database)) -> anyhow::Result<()> {
        let (_dir, database) = database;
        let root = Commit::root()?;
        database.store(&root)?;

        assert!(database.has_commit(root.object_id()));
        assert!(!database.has_blob(root.object_id()));
        assert_eq!(database.load_commit(root.object_id())?, root);
        Ok(())
    }

    #[rstest]
    fn missing_objects_are_reported(database: (TempDir, Database)) -> anyhow::Result<()> {
        let (_dir, database) = database;
        let oid = Blob::new("ghost.txt", "boo")?.object_id().clone();

        let error = database.load_blob(&oid).unwrap_err();
        assert_eq!(
            error.downcast_ref::<TwigError>(),
            Some(&TwigError::ObjectNotFound(oid.to_string()))
        );
        Ok(())
    }
}
