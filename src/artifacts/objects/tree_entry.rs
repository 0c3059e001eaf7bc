//! A single entry of a tree object
//!
//! A [`TreeEntry`] is a mode, a name and the id of the object it points at,
//! bound to the [`Repository`] that can load that object. Loading is deferred
//! until [`TreeEntry::object`] is first called and the result is kept for the
//! lifetime of the entry.
//!
//! Entries can be built from:
//! - a raw tree line (`<mode> <name>\0<20 packed bytes>` or a 40-hex hash)
//! - a numeric mode plus separate name and hash
//! - an octal mode string plus separate name and hash
//!
//! The hash may be given packed or unpacked in every case; it is always
//! exposed as 40 lowercase hex characters.

use crate::areas::repository::Repository;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::PACKED_OBJECT_ID_LENGTH;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{ObjectError, Result};
use std::sync::{Arc, Mutex, PoisonError};

/// File type bits of a mode (`S_IFMT`)
const MODE_TYPE_MASK: u32 = 0o170000;

#[derive(Debug, Clone, Default)]
enum Resolution {
    #[default]
    Unresolved,
    Resolved(Arc<ObjectBox>),
}

/// One entry of a decoded tree object
///
/// The `'r` lifetime ties the entry to the repository it resolves against;
/// the entry never owns the repository.
pub struct TreeEntry<'r, R: Repository + ?Sized> {
    mode: u32,
    name: String,
    oid: ObjectId,
    repository: &'r R,
    resolution: Mutex<Resolution>,
}

impl<'r, R: Repository + ?Sized> TreeEntry<'r, R> {
    /// Build an entry from one raw tree record
    ///
    /// The line is `<mode> <name>` followed by the hash, either as NUL plus
    /// 20 packed bytes (the on-disk encoding) or as a 40-hex token after a NUL,
    /// tab or space. Trailing whitespace after either form is ignored.
    pub fn from_tree_line(line: &[u8], repository: &'r R) -> Result<Self> {
        let (mode, name, hash) = split_tree_line(line)?;
        let mode = EntryMode::parse_octal(mode)?;

        Self::with_mode(mode, name, hash, repository)
    }

    /// Build an entry from an octal mode string such as `"100644"`
    pub fn with_mode_str(
        mode: &str,
        name: impl Into<String>,
        hash: impl AsRef<[u8]>,
        repository: &'r R,
    ) -> Result<Self> {
        let mode = EntryMode::parse_octal(mode)?;

        Self::with_mode(mode, name, hash, repository)
    }

    /// Build an entry from an already parsed mode
    ///
    /// # Arguments
    ///
    /// * `mode` - Raw mode bits, e.g. `0o100644`; not checked against known modes
    /// * `name` - Path component; must be non-empty without `/` or NUL
    /// * `hash` - 20 packed bytes or 40 hex characters
    /// * `repository` - Where [`TreeEntry::object`] loads the target from
    ///
    /// # Returns
    ///
    /// An unresolved entry, or `InvalidName`, `InvalidHashLength` or
    /// `InvalidHashEncoding`
    pub fn with_mode(
        mode: u32,
        name: impl Into<String>,
        hash: impl AsRef<[u8]>,
        repository: &'r R,
    ) -> Result<Self> {
        let name = validate_name(name.into())?;
        let oid = ObjectId::normalize(hash.as_ref())?;

        Ok(Self::assemble(mode, name, oid, repository))
    }

    pub(crate) fn from_record(name: String, entry: &DatabaseEntry, repository: &'r R) -> Self {
        Self::assemble(entry.mode, name, entry.oid.clone(), repository)
    }

    fn assemble(mode: u32, name: String, oid: ObjectId, repository: &'r R) -> Self {
        TreeEntry {
            mode,
            name,
            oid,
            repository,
            resolution: Mutex::new(Resolution::Unresolved),
        }
    }

    /// Raw octal mode, e.g. `0o100644`
    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn repository(&self) -> &'r R {
        self.repository
    }

    pub fn kind(&self) -> Option<EntryMode> {
        EntryMode::from_u32(self.mode)
    }

    /// Object type the mode says this entry points at
    ///
    /// This is derived from the mode alone; the stored object may disagree.
    pub fn object_type(&self) -> ObjectType {
        match self.mode & MODE_TYPE_MASK {
            0o040000 => ObjectType::Tree,
            0o160000 => ObjectType::Commit,
            _ => ObjectType::Blob,
        }
    }

    pub fn is_tree(&self) -> bool {
        self.object_type() == ObjectType::Tree
    }

    pub fn is_resolved(&self) -> bool {
        matches!(*self.lock_resolution(), Resolution::Resolved(_))
    }

    /// The referenced object, loaded from the repository on first use
    ///
    /// Only the first successful lookup reaches the repository; its result is
    /// returned by every later call. A failed lookup leaves the entry
    /// unresolved, so calling again retries. Concurrent first calls wait for
    /// each other and observe the same object.
    pub fn object(&self) -> Result<Arc<ObjectBox>> {
        let mut resolution = self.lock_resolution();

        if let Resolution::Resolved(object) = &*resolution {
            return Ok(Arc::clone(object));
        }

        let object = Arc::new(self.repository.lookup(&self.oid)?);
        *resolution = Resolution::Resolved(Arc::clone(&object));

        Ok(object)
    }

    fn lock_resolution(&self) -> std::sync::MutexGuard<'_, Resolution> {
        // the cache is only written after a successful lookup, so a poisoned
        // lock still holds a consistent state
        self.resolution
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Repository + ?Sized> PartialEq for TreeEntry<'_, R> {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && self.name == other.name && self.oid == other.oid
    }
}

impl<R: Repository + ?Sized> Eq for TreeEntry<'_, R> {}

impl<R: Repository + ?Sized> std::fmt::Debug for TreeEntry<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeEntry")
            .field("mode", &format_args!("{:o}", self.mode))
            .field("name", &self.name)
            .field("oid", &self.oid)
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

/// `ls-tree` format: `<mode> <type> <oid>\t<name>`
impl<R: Repository + ?Sized> std::fmt::Display for TreeEntry<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:06o} {} {}\t{}",
            self.mode,
            self.object_type(),
            self.oid,
            self.name
        )
    }
}

fn validate_name(name: String) -> Result<String> {
    if name.is_empty() || name.contains(['/', '\0']) {
        return Err(ObjectError::InvalidName(name));
    }

    Ok(name)
}

/// Split a tree line into its mode token, name and hash token
fn split_tree_line(line: &[u8]) -> Result<(&str, String, &[u8])> {
    let malformed = |reason: &str| ObjectError::MalformedTreeLine(reason.to_string());

    let space = line
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| malformed("missing space after mode"))?;
    let (mode, rest) = (&line[..space], &line[space + 1..]);
    if mode.is_empty() {
        return Err(malformed("empty mode"));
    }
    let mode = std::str::from_utf8(mode)
        .map_err(|_| ObjectError::InvalidMode(String::from_utf8_lossy(mode).into_owned()))?;

    let (name, hash) = split_name_and_hash(rest).ok_or_else(|| malformed("missing hash"))?;
    if name.is_empty() {
        return Err(malformed("empty name"));
    }
    let name = std::str::from_utf8(name).map_err(|_| malformed("name is not valid UTF-8"))?;

    Ok((mode, name.to_string(), hash))
}

fn split_name_and_hash(rest: &[u8]) -> Option<(&[u8], &[u8])> {
    let trimmed = rest.trim_ascii_end();

    // on-disk form: NUL then the packed digest. The digest itself may end in
    // whitespace bytes, so drop as little trailing whitespace as possible.
    let packed = (trimmed.len()..=rest.len())
        .rev()
        .find_map(|end| split_packed(&rest[..end]));
    if packed.is_some() {
        return packed;
    }

    let separator = trimmed
        .iter()
        .rposition(|&b| matches!(b, b'\0' | b'\t' | b' '))?;

    Some((&trimmed[..separator], &trimmed[separator + 1..]))
}

fn split_packed(record: &[u8]) -> Option<(&[u8], &[u8])> {
    let nul = record.len().checked_sub(PACKED_OBJECT_ID_LENGTH + 1)?;

    (record[nul] == b'\0').then(|| (&record[..nul], &record[nul + 1..]))
}
