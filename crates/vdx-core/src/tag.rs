//! The [`Tag`] field identifier.

use std::fmt;

/// Identifies a field within a message type.
///
/// Tags are assigned when the schema is written and never reused or
/// reassigned across schema versions. Tag 0 is not a valid field tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u32);

impl Tag {
    /// Returns `true` for tags a schema may declare (non-zero).
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Tag {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
