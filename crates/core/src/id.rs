//! Strongly-typed snippet identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a snippet.
///
/// Assigned by storage on insert; always positive and never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(i64);

impl SnippetId {
    /// Wrap a storage-assigned id. Returns `None` for values below 1.
    pub fn new(value: i64) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for SnippetId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<SnippetId> for i64 {
    fn from(value: SnippetId) -> Self {
        value.0
    }
}

impl FromStr for SnippetId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = i64::from_str(s)
            .map_err(|e| DomainError::invalid_id(format!("SnippetId: {e}")))?;
        Self::new(value).ok_or_else(|| DomainError::invalid_id(format!("SnippetId: {value} < 1")))
    }
}
