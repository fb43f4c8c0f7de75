//! Normalized string tags.
//!
//! Skills, role names and group labels arrive from spreadsheets and
//! registries with inconsistent casing and whitespace. They are normalized
//! once, when the record is built or deserialized, and compared by exact
//! equality afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A case-insensitive label (trimmed, lowercased).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Normalizes a raw label.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the tag is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact match, or either tag contains the other.
    ///
    /// Empty tags never match.
    pub fn loosely_matches(&self, other: &Tag) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.0 == other.0 || self.0.contains(&other.0) || other.0.contains(&self.0)
    }
}

impl From<String> for Tag {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for Tag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
