use crate::artifacts::objects::OBJECT_FORMAT_VERSION;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Directory of the object database holding objects of this type
    pub fn store_dir(&self) -> &str {
        match self {
            ObjectType::Blob => "blobs",
            ObjectType::Commit => "commits",
        }
    }

    /// Record header for a body of the given size
    pub fn header(&self, size: usize) -> String {
        format!("{} {} {}\0", self.as_str(), OBJECT_FORMAT_VERSION, size)
    }

    /// Read the `<type> <version> <size>\0` header, leaving the reader at the body
    pub fn parse_object_header(data_reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;

        let object_type = String::from_utf8(object_type)?;
        let object_type = ObjectType::try_from(object_type.trim())?;

        let mut version = Vec::new();
        data_reader.read_until(b' ', &mut version)?;
        let version = String::from_utf8(version)?.trim().parse::<u32>()?;

        if version != OBJECT_FORMAT_VERSION {
            return Err(anyhow::anyhow!(
                "Unsupported {} record version: {}",
                object_type,
                version
            ));
        }

        // skip the size part
        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;

        Ok(object_type)
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Invalid object type")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
