//! Git object types and operations
//!
//! Git stores all content as objects identified by SHA-1 hashes:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//!
//! Objects are read in the loose format `<type> <size>\0<content>`.
//! [`tree_entry::TreeEntry`] binds a single tree record to a repository and
//! loads its target lazily; [`time_zone`] parses the UTC offsets found on
//! commit authorship lines.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod time_zone;
pub mod tree;
pub mod tree_entry;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a raw SHA-1 digest
pub const PACKED_OBJECT_ID_LENGTH: usize = 20;
