use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::state::{HEADER_SIZE, SIGNATURE, VERSION};
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StateHeader {
    pub marker: String,
    pub version: u32,
}

impl Default for StateHeader {
    fn default() -> Self {
        StateHeader::new(SIGNATURE.to_string(), VERSION)
    }
}

impl Packable for StateHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut header_bytes = Vec::with_capacity(HEADER_SIZE);
        header_bytes.write_all(self.marker.as_bytes())?;
        header_bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;

        Ok(Bytes::from(header_bytes))
    }
}

impl Unpackable for StateHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader.read_exact(&mut bytes)?;

        let marker = String::from_utf8_lossy(&bytes[0..4]).to_string();
        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);

        Ok(StateHeader { marker, version })
    }
}
