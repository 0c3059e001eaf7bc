//! Error taxonomy for tree entries, hashes and offsets
//!
//! Input-validation failures are raised synchronously by constructors and
//! parsers. `ObjectNotFound` and `CorruptObject` originate in a
//! [`Repository`](crate::areas::repository::Repository) and travel unchanged
//! through [`TreeEntry::object`](crate::artifacts::objects::tree_entry::TreeEntry::object).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// Hash input is neither 20 packed bytes nor 40 hex characters
    #[error("invalid hash length: {0} (expected 20 packed bytes or 40 hex characters)")]
    InvalidHashLength(usize),

    #[error("invalid hash encoding: {0:?} is not hexadecimal")]
    InvalidHashEncoding(String),

    #[error("malformed tree line: {0}")]
    MalformedTreeLine(String),

    #[error("invalid entry mode: {0:?}")]
    InvalidMode(String),

    #[error("invalid entry name: {0:?}")]
    InvalidName(String),

    #[error("invalid UTC offset: {0:?} (expected +HHMM or -HHMM)")]
    InvalidOffsetFormat(String),

    #[error("object {0} not found")]
    ObjectNotFound(String),

    #[error("object {oid} is corrupt: {reason}")]
    CorruptObject { oid: String, reason: String },
}

impl ObjectError {
    /// Whether a later attempt at the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ObjectError::ObjectNotFound(_) | ObjectError::CorruptObject { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ObjectError>;
