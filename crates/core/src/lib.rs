//! `snippetbox-core`: snippet domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod clock;
pub mod entity;
pub mod error;
pub mod form;
pub mod id;
pub mod snippet;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, FieldErrors, StoreError, StoreResult};
pub use form::CreateSnippetForm;
pub use id::SnippetId;
pub use snippet::{ExpiryDays, NewSnippet, Snippet, LATEST_LIMIT};
