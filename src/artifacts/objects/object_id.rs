//! Git object identifier (SHA-1 hash)
//!
//! Object IDs show up in two encodings across the serialized object formats:
//!
//! - Unpacked: 40 hexadecimal characters (commit headers, refs, user input)
//! - Packed: the raw 20-byte digest (tree object records)
//!
//! [`ObjectId`] always holds the unpacked form in lowercase, whatever it was
//! built from, so two ids for the same object compare equal.
//!
//! ## Storage
//!
//! Loose objects live at `objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, PACKED_OBJECT_ID_LENGTH};
use crate::errors::{ObjectError, Result};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

/// Git object identifier in canonical lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Normalize either hash encoding into an object ID
    ///
    /// `raw` may be the 20-byte packed digest or the 40-character hex text
    /// (any case). Any other length is rejected with `InvalidHashLength`, and
    /// 40 bytes that are not all hex digits with `InvalidHashEncoding`.
    pub fn normalize(raw: &[u8]) -> Result<Self> {
        match raw.len() {
            PACKED_OBJECT_ID_LENGTH => Ok(Self(hex::encode(raw))),
            OBJECT_ID_LENGTH => {
                if !raw.iter().all(u8::is_ascii_hexdigit) {
                    return Err(ObjectError::InvalidHashEncoding(
                        String::from_utf8_lossy(raw).into_owned(),
                    ));
                }
                let hex40 = String::from_utf8_lossy(raw).to_ascii_lowercase();
                Ok(Self(hex40))
            }
            len => Err(ObjectError::InvalidHashLength(len)),
        }
    }

    /// Parse and validate an object ID from its 40-character text form
    ///
    /// # Arguments
    ///
    /// * `id` - 40 hexadecimal characters, any case
    ///
    /// # Returns
    ///
    /// The normalized id, `InvalidHashLength` when `id` is not 40 characters
    /// long or `InvalidHashEncoding` when they are not all hex digits
    pub fn try_parse(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref();
        let chars = id.chars().count();

        if chars != OBJECT_ID_LENGTH {
            return Err(ObjectError::InvalidHashLength(chars));
        }
        // 40 chars but not 40 bytes means non-ASCII content
        if id.len() != OBJECT_ID_LENGTH {
            return Err(ObjectError::InvalidHashEncoding(id.to_string()));
        }

        Self::normalize(id.as_bytes())
    }

    /// Build an object ID from a raw digest
    ///
    /// # Arguments
    ///
    /// * `packed` - The 20-byte SHA-1 digest as stored in tree records
    pub fn from_packed(packed: [u8; PACKED_OBJECT_ID_LENGTH]) -> Self {
        Self(hex::encode(packed))
    }

    /// The raw 20-byte digest
    pub fn to_packed(&self) -> [u8; PACKED_OBJECT_ID_LENGTH] {
        let mut packed = [0u8; PACKED_OBJECT_ID_LENGTH];
        // every constructor yields exactly 40 lowercase hex digits
        let decoded = hex::decode_to_slice(&self.0, &mut packed);
        debug_assert!(decoded.is_ok(), "object id {:?} is not 40 hex digits", self.0);
        packed
    }

    /// Read a packed object ID (20 bytes) from a tree record stream
    pub fn read_packed_from<R: io::Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut packed = [0u8; PACKED_OBJECT_ID_LENGTH];
        reader.read_exact(&mut packed)?;

        Ok(Self::from_packed(packed))
    }

    /// Convert to the loose object path, e.g. `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash (standard Git abbreviation)
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ObjectId {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = ObjectError;

    fn try_from(raw: &[u8]) -> Result<Self> {
        Self::normalize(raw)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
