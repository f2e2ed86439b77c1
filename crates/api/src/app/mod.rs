//! HTTP API application wiring (Axum router + dependency wiring).
//!
//! This folder is structured like:
//! - `routes/`: route table and handlers
//! - `dto.rs`: data handed to the rendering layer
//! - `errors.rs`: error-to-response translation

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::context::AppContext;

pub mod dto;
pub mod errors;
pub mod routes;

pub use routes::RouteError;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(ctx: Arc<AppContext>) -> Result<Router, RouteError> {
    let static_files = ServeDir::new(ctx.static_dir()).append_index_html_on_directories(false);

    // Request span and response line at INFO. 5xx are logged once by the
    // error that produced them, so `on_failure` is off.
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
        .on_failure(());

    Ok(routes::router(routes::ROUTES)?
        .nest_service(routes::STATIC_PREFIX, static_files)
        .fallback(not_found)
        .layer(Extension(ctx))
        .layer(ServiceBuilder::new().layer(trace)))
}

async fn not_found() -> errors::AppError {
    errors::AppError::NotFound
}
