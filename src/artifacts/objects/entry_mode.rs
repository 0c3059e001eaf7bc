//! Tree entry modes
//!
//! Tree records carry an octal mode. Git only ever writes five of them:
//!
//! | octal    | meaning                  |
//! |----------|--------------------------|
//! | `100644` | regular file             |
//! | `100755` | executable file          |
//! | `120000` | symbolic link            |
//! | `40000`  | subtree (directory)      |
//! | `160000` | gitlink (submodule)      |
//!
//! Older repositories may contain other file modes (e.g. `100664`), so the raw
//! value is what a tree entry stores; [`EntryMode`] is only an interpretation.

use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{ObjectError, Result};

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum EntryMode {
    File(FileMode),
    Symlink,
    #[default]
    Directory,
    Gitlink,
}

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Symlink => "120000",
            EntryMode::Directory => "40000",
            EntryMode::Gitlink => "160000",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::File(FileMode::Regular) => 0o100644,
            EntryMode::File(FileMode::Executable) => 0o100755,
            EntryMode::Symlink => 0o120000,
            EntryMode::Directory => 0o40000,
            EntryMode::Gitlink => 0o160000,
        }
    }

    /// Interpret a raw mode, `None` for modes git does not write
    pub fn from_u32(mode: u32) -> Option<Self> {
        match mode {
            0o100644 => Some(EntryMode::File(FileMode::Regular)),
            0o100755 => Some(EntryMode::File(FileMode::Executable)),
            0o120000 => Some(EntryMode::Symlink),
            0o40000 => Some(EntryMode::Directory),
            0o160000 => Some(EntryMode::Gitlink),
            _ => None,
        }
    }

    /// Parse an octal mode token into its raw value
    ///
    /// Accepts any non-empty run of octal digits, including a leading zero
    /// (`040000`) and modes outside the five listed above.
    pub fn parse_octal(mode: &str) -> Result<u32> {
        if mode.is_empty() || !mode.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(ObjectError::InvalidMode(mode.to_string()));
        }

        u32::from_str_radix(mode, 8).map_err(|_| ObjectError::InvalidMode(mode.to_string()))
    }

    /// The object type an entry with this mode is expected to point at
    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::Directory => ObjectType::Tree,
            EntryMode::Gitlink => ObjectType::Commit,
            EntryMode::File(_) | EntryMode::Symlink => ObjectType::Blob,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }
}

impl From<EntryMode> for u32 {
    fn from(mode: EntryMode) -> Self {
        mode.as_u32()
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}

impl TryFrom<u32> for EntryMode {
    type Error = ObjectError;

    fn try_from(mode: u32) -> Result<Self> {
        Self::from_u32(mode).ok_or_else(|| ObjectError::InvalidMode(format!("{mode:o}")))
    }
}

impl TryFrom<&str> for EntryMode {
    type Error = ObjectError;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_from(Self::parse_octal(value)?)
    }
}
