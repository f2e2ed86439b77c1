//! Snippet persistence boundary.
//!
//! `SnippetStore` is the only way the rest of the system reads or writes
//! snippets. Two implementations exist: Postgres (production) and in-memory
//! (tests/dev).

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemorySnippetStore;
pub use postgres::PostgresSnippetStore;
pub use r#trait::SnippetStore;
