use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical font name such as `"normal"` or `"bold"`.
///
/// Font ids are resolved to loaded faces by the drawing surface; the layout
/// engine only ever compares and forwards them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontId(String);

impl FontId {
    /// The id every document starts in and reverts to.
    pub const NORMAL: &'static str = "normal";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn normal() -> Self {
        Self::new(Self::NORMAL)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FontId {
    fn default() -> Self {
        Self::normal()
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FontId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FontId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for FontId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FontId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
