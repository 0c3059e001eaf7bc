//! Database entry types
//!
//! Records read out of tree objects before they are bound to a repository.

pub mod database_entry;
