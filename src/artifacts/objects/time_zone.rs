//! UTC offsets from commit and tag timestamp lines
//!
//! Author, committer and tagger lines end with `<epoch-seconds> <offset>`,
//! where the offset is a sign followed by `HHMM`, e.g. `+0200` or `-0530`.

use crate::errors::{ObjectError, Result};
use chrono::FixedOffset;

const OFFSET_LENGTH: usize = 5;

/// A fixed UTC offset, in signed minutes east of UTC
///
/// Any well-formed `±HHMM` token is representable, including ones a full
/// day or more away from UTC that [`FixedOffset`] refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset(i32);

impl Offset {
    pub fn from_minutes(minutes: i32) -> Self {
        Offset(minutes)
    }

    /// Signed minutes east of UTC
    pub fn minutes(&self) -> i32 {
        self.0
    }

    /// Convert into a chrono time zone
    ///
    /// # Returns
    ///
    /// `None` when the offset is outside the ±24h range chrono supports
    pub fn to_fixed_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.0.checked_mul(60)?)
    }
}

impl From<FixedOffset> for Offset {
    fn from(offset: FixedOffset) -> Self {
        Offset(offset.local_minus_utc() / 60)
    }
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let minutes = self.0.unsigned_abs();

        write!(f, "{sign}{:02}{:02}", minutes / 60, minutes % 60)
    }
}

/// Parse a `±HHMM` token into a fixed offset
///
/// # Arguments
///
/// * `offset` - Exactly a sign (`+` or `-`) followed by four ASCII digits
///
/// # Returns
///
/// The signed offset, sign × (hours × 60 + minutes). The hour and minute
/// fields are only checked for being digits, so `+0075` is 75 minutes east
/// and `+2400` is 1440 minutes east.
pub fn parse_offset(offset: &str) -> Result<Offset> {
    let invalid = || ObjectError::InvalidOffsetFormat(offset.to_string());

    let bytes = offset.as_bytes();
    if bytes.len() != OFFSET_LENGTH {
        return Err(invalid());
    }

    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(invalid()),
    };
    if !bytes[1..].iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    let digit = |i: usize| i32::from(bytes[i] - b'0');
    let hours = digit(1) * 10 + digit(2);
    let minutes = digit(3) * 10 + digit(4);

    Ok(Offset(sign * (hours * 60 + minutes)))
}

/// Render a chrono offset back into its `±HHMM` token
pub fn format_offset(offset: &FixedOffset) -> String {
    Offset::from(*offset).to_string()
}
