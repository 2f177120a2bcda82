use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> &ObjectId;

    fn object_path(&self) -> PathBuf {
        PathBuf::from(self.object_type().store_dir()).join(self.object_id().to_path())
    }
}

/// SHA-1 over the concatenation of `parts`
pub fn hash_parts<'p>(parts: impl IntoIterator<Item = &'p [u8]>) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part);
    }

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}"))
}
