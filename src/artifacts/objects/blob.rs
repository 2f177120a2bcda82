//! Blob object
//!
//! A blob is one file's content at one point in time. Unlike a bare content hash,
//! the blob id also covers the file name, so the same bytes under two names are
//! two different blobs.
//!
//! ## Format
//!
//! On disk: `blob <version> <size>\0<filename>\0<content>`
//! Id: `sha1(filename ‖ "BLOB" ‖ content)`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, hash_parts};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Write};

/// Marker folded into every blob id between the file name and the content
const BLOB_MARKER: &[u8] = b"BLOB";

/// Whether a file name fits on one line of a commit record
pub fn is_storable_name(filename: &str) -> bool {
    !filename.contains(['\n', '\r', '\0'])
}

/// Content snapshot of a single tracked file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    oid: ObjectId,
    filename: String,
    content: Bytes,
}

impl Blob {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> anyhow::Result<Self> {
        let filename = filename.into();
        if !is_storable_name(&filename) {
            anyhow::bail!("File name {:?} contains a line break", filename);
        }
        let content = content.into();
        let oid = hash_parts([filename.as_bytes(), BLOB_MARKER, &content[..]])?;

        Ok(Blob {
            oid,
            filename,
            content,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        content_bytes.write_all(self.filename.as_bytes())?;
        content_bytes.write_all(b"\0")?;
        content_bytes.write_all(&self.content)?;

        let mut blob_bytes = Vec::new();
        blob_bytes.write_all(self.object_type().header(content_bytes.len()).as_bytes())?;
        blob_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut filename = Vec::new();
        reader.read_until(b'\0', &mut filename)?;
        filename
            .pop()
            .filter(|terminator| *terminator == b'\0')
            .context("Invalid blob object: missing filename terminator")?;
        let filename = String::from_utf8(filename)?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Self::new(filename, content)
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn object_id(&self) -> &ObjectId {
        &self.oid
    }
}
