//! Domain and storage error model.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type returned by snippet stores.
pub type StoreResult<T> = Result<T, StoreError>;

/// Per-field validation messages, keyed by form field name.
///
/// Ordered so that responses and log lines are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message recorded for a field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Domain-level error.
///
/// Raised before any storage call is made; a request that fails here never
/// produces a write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Client input failed validation. Always recoverable by correcting the input.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// An identifier was malformed (non-numeric, zero or negative).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Snippet store operation error.
///
/// Callers branch on the variant, never on the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No active snippet matches the query. Covers both "never existed" and
    /// "expired"; the two are deliberately indistinguishable.
    #[error("no matching record found")]
    NoRecord,

    /// The persistence backend failed (connectivity, malformed query,
    /// constraint violation). Not retriable at this layer.
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl StoreError {
    pub fn failure(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }

    pub fn is_no_record(&self) -> bool {
        matches!(self, Self::NoRecord)
    }
}
