//! Short code value type.

use serde::{Serialize, Serializer};
use std::fmt;

/// Characters a short code may contain.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 8;

/// A well-formed short code: 6 to 8 ASCII alphanumeric characters.
///
/// This is the only key type accepted by record lookups and the lookup cache,
/// so a malformed path segment can never reach either of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Parses a candidate code, returning `None` if it is not well-formed.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&raw.len())
            && raw.bytes().all(|b| b.is_ascii_alphanumeric());

        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ShortCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
