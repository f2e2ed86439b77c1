//! HTTP API: routing, request handlers, and response mapping.

pub mod app;
pub mod context;
