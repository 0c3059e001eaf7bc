use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{ObjectError, Result};
use anyhow::Context;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::Path;

/// Read-only loose object store (`.git/objects`)
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read objects out of packfiles as well
impl Database {
    /// Create a store over an objects directory
    ///
    /// # Arguments
    ///
    /// * `path` - The `objects` directory itself, e.g. `.git/objects`
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Open the object store of the repository rooted at `root`
    pub fn discover(root: impl AsRef<Path>) -> io::Result<Self> {
        let path = root.as_ref().join(".git").join("objects");
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No object database at {}", path.display()),
            ));
        }

        Ok(Self::new(path.into_boxed_path()))
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Read, inflate and verify an object, header included
    pub fn load(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        let object_content = std::fs::read(&object_path)
            .map_err(|err| Self::unreadable(object_id, &object_path, err))?;

        Self::decompress(object_content.into())
            .and_then(|object_content| Self::verify(object_id, object_content))
            .map_err(|err| Self::corrupt(object_id, err))
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        let object_content = self.load(object_id)?;

        Self::decode(object_content).map_err(|err| Self::corrupt(object_id, err))
    }

    /// Type of a stored object, read from its header only
    ///
    /// Only the first few inflated bytes are read, so the payload is neither
    /// size-checked nor hash-verified; use [`Database::parse_object`] for that.
    pub fn object_type(&self, object_id: &ObjectId) -> Result<ObjectType> {
        let object_path = self.path.join(object_id.to_path());
        let object_file = File::open(&object_path)
            .map_err(|err| Self::unreadable(object_id, &object_path, err))?;
        let mut header_reader = BufReader::new(flate2::read::ZlibDecoder::new(object_file));

        ObjectType::parse_object_header(&mut header_reader)
            .map(|(object_type, _)| object_type)
            .context("Unable to read object header")
            .map_err(|err| Self::corrupt(object_id, err))
    }

    fn decode(object_content: Bytes) -> anyhow::Result<ObjectBox> {
        let mut object_reader = Cursor::new(object_content);
        let (object_type, size) = ObjectType::parse_object_header(&mut object_reader)?;

        let payload_size = object_reader.get_ref().len() - object_reader.position() as usize;
        if payload_size != size {
            return Err(anyhow::anyhow!(
                "Size mismatch: header claims {size} bytes, actual {payload_size} bytes"
            ));
        }

        ObjectBox::deserialize(object_type, object_reader)
            .context(format!("Unable to decode {object_type} object"))
    }

    fn verify(object_id: &ObjectId, object_content: Bytes) -> anyhow::Result<Bytes> {
        let actual = format!("{:x}", Sha1::digest(&object_content));
        if actual != object_id.as_ref() {
            return Err(anyhow::anyhow!("Content hashes to {actual}"));
        }

        Ok(object_content)
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn unreadable(object_id: &ObjectId, object_path: &Path, err: io::Error) -> ObjectError {
        if err.kind() == io::ErrorKind::NotFound {
            tracing::debug!(oid = %object_id, "object not found");
            return ObjectError::ObjectNotFound(object_id.to_string());
        }

        let err = anyhow::Error::new(err).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ));
        Self::corrupt(object_id, err)
    }

    fn corrupt(object_id: &ObjectId, err: anyhow::Error) -> ObjectError {
        let reason = format!("{err:#}");
        tracing::debug!(oid = %object_id, %reason, "object is corrupt");

        ObjectError::CorruptObject {
            oid: object_id.to_string(),
            reason,
        }
    }
}

impl Repository for Database {
    fn lookup(&self, oid: &ObjectId) -> Result<ObjectBox> {
        tracing::trace!(oid = %oid, path = %self.path.display(), "looking up object");

        self.parse_object(oid)
    }
}
