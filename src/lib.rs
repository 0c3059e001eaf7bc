//! Read-only Git tree entries
//!
//! Parses tree records into [`TreeEntry`] values that normalize packed and
//! unpacked hashes, interpret octal modes and load the object they point at
//! only when asked. Also parses the `±HHMM` offsets of commit timestamps.

pub mod areas;
pub mod artifacts;
pub mod errors;

pub use areas::database::Database;
pub use areas::repository::Repository;
pub use artifacts::objects::object::ObjectBox;
pub use artifacts::objects::object_id::ObjectId;
pub use artifacts::objects::time_zone::{Offset, parse_offset};
pub use artifacts::objects::tree_entry::TreeEntry;
pub use errors::{ObjectError, Result};
