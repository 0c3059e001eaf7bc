//! Object sources
//!
//! - `repository`: The lookup contract tree entries resolve through
//! - `database`: Read-only loose object store implementing it

pub mod database;
pub mod repository;
