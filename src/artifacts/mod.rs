//! Git data structures
//!
//! - `database`: Records decoded from tree objects
//! - `objects`: Git object types (blob, tree, commit), tree entries and offsets

pub mod database;
pub mod objects;
