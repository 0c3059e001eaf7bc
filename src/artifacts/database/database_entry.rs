use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// One decoded tree record, detached from any repository
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DatabaseEntry {
    pub oid: ObjectId,
    /// Raw octal mode as stored in the tree
    pub mode: u32,
}

impl DatabaseEntry {
    pub fn entry_mode(&self) -> Option<EntryMode> {
        EntryMode::from_u32(self.mode)
    }

    pub fn is_tree(&self) -> bool {
        self.entry_mode().is_some_and(|mode| mode.is_tree())
    }
}
