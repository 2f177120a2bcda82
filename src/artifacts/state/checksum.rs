//! SHA-1 checksummed stream
//!
//! Every byte read or written through a `Checksum` is folded into a running digest,
//! which is appended to (or verified against) the end of the state record.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::state::CHECKSUM_SIZE;
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

#[derive(Debug)]
pub struct Checksum<S> {
    stream: S,
    digest: Sha1,
    /// Bytes left in the underlying record, bounding every read
    remaining: u64,
}

impl<S> Checksum<S> {
    pub fn new(stream: S) -> Self {
        Self::with_limit(stream, u64::MAX)
    }

    pub fn with_limit(stream: S, limit: u64) -> Self {
        Checksum {
            stream,
            digest: Sha1::new(),
            remaining: limit,
        }
    }
}

impl<S: Read> Checksum<S> {
    pub fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        if size as u64 > self.remaining {
            return Err(TwigError::CorruptedState(format!(
                "length {} runs past the end of the state record",
                size
            ))
            .into());
        }
        self.remaining -= size as u64;

        let mut buffer = vec![0; size];
        self.stream.read_exact(&mut buffer).map_err(|_| {
            TwigError::CorruptedState("unexpected end-of-file while reading state".to_string())
        })?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub fn read_u32(&mut self) -> anyhow::Result<u32> {
        let bytes = self.read(4)?;
        Ok(byteorder::NetworkEndian::read_u32(&bytes))
    }

    pub fn read_string(&mut self) -> anyhow::Result<String> {
        let length = self.read_u32()? as usize;
        let bytes = self.read(length)?;

        String::from_utf8(bytes.to_vec())
            .map_err(|_| TwigError::CorruptedState("invalid utf-8 string".to_string()).into())
    }

    pub fn read_oid(&mut self) -> anyhow::Result<ObjectId> {
        let bytes = self.read(OBJECT_ID_LENGTH / 2)?;
        ObjectId::read_h40_from(&mut &bytes[..])
    }

    /// Compare the running digest with the trailing checksum
    pub fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.stream
            .read_exact(&mut expected_checksum)
            .map_err(|_| TwigError::CorruptedState("missing checksum".to_string()))?;

        let actual_checksum = self.digest.clone().finalize();

        if expected_checksum != actual_checksum.as_slice() {
            return Err(TwigError::CorruptedState(
                "checksum does not match value stored on disk".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl<S: Write> Checksum<S> {
    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.stream.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> anyhow::Result<()> {
        let mut bytes = Vec::with_capacity(4);
        bytes.write_u32::<byteorder::NetworkEndian>(value)?;
        self.write(&bytes)
    }

    pub fn write_string(&mut self, value: &str) -> anyhow::Result<()> {
        self.write_u32(u32::try_from(value.len())?)?;
        self.write(value.as_bytes())
    }

    pub fn write_oid(&mut self, oid: &ObjectId) -> anyhow::Result<()> {
        let mut bytes = Vec::with_capacity(OBJECT_ID_LENGTH / 2);
        oid.write_h40_to(&mut bytes)?;
        self.write(&bytes)
    }

    pub fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.stream
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to state file"))?;

        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}
