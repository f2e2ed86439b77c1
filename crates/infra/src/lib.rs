//! Infrastructure layer: snippet persistence and configuration.

pub mod config;
pub mod snippet_store;

pub use config::{Config, ConfigError};
pub use snippet_store::{InMemorySnippetStore, PostgresSnippetStore, SnippetStore};
