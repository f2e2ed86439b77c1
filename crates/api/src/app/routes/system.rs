use axum::http::StatusCode;

/// Liveness probe. Never touches storage.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
