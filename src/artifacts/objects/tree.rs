//! Git tree object
//!
//! Trees are directory snapshots: a list of named entries, each with a mode
//! and the id of a blob, subtree or (for submodules) commit.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Decoding only records what each entry points at; binding an entry to a
//! [`Repository`] through [`Tree::entries`] gives [`TreeEntry`] values that
//! can load their target on demand.

use crate::areas::repository::Repository;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree_entry::TreeEntry;
use anyhow::Context;
use std::io::BufRead;

/// Git tree object as read from the database, entries in on-disk order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    records: Vec<(String, DatabaseEntry)>,
}

impl Tree {
    pub fn records(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.records.iter().map(|(name, entry)| (name, entry))
    }

    /// Entries bound to `repository`, each able to resolve its own target
    pub fn entries<'r, R>(&self, repository: &'r R) -> impl Iterator<Item = TreeEntry<'r, R>>
    where
        R: Repository + ?Sized,
    {
        self.records
            .iter()
            .map(move |(name, entry)| TreeEntry::from_record(name.clone(), entry, repository))
    }

    pub fn get(&self, name: &str) -> Option<&DatabaseEntry> {
        self.records
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut records = Vec::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(anyhow::anyhow!("unexpected EOF in mode"));
            }

            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = EntryMode::parse_octal(mode_str)?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(anyhow::anyhow!("unexpected EOF in name"));
            }
            if name_bytes.is_empty() {
                return Err(anyhow::anyhow!("empty entry name"));
            }
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid =
                ObjectId::read_packed_from(&mut reader).context("unexpected EOF in object id")?;

            records.push((name, DatabaseEntry::new(oid, mode)));
        }

        Ok(Tree { records })
    }
}
