use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use snippetbox_core::{CreateSnippetForm, DomainError, FieldErrors, StoreError};

use crate::app::dto::{FormState, TemplateData};

/// Every way a handler can fail, mapped to exactly one HTTP outcome.
#[derive(Debug)]
pub enum AppError {
    /// Malformed id, unknown id, or expired snippet.
    NotFound,

    /// Create-form input was rejected before reaching storage. The submitted
    /// values travel with the errors so the form can be redisplayed.
    Validation {
        form: CreateSnippetForm,
        errors: FieldErrors,
    },

    /// Storage failed. The detail is logged, never sent to the client.
    Internal(String),
}

impl AppError {
    pub fn from_domain(err: DomainError, form: CreateSnippetForm) -> Self {
        match err {
            DomainError::Validation(errors) => Self::Validation { form, errors },
            DomainError::InvalidId(_) => Self::NotFound,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoRecord => Self::NotFound,
            StoreError::StorageFailure(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "Not Found"),
            AppError::Validation { form, errors } => TemplateData::new()
                .with_form(FormState::with_errors(form, errors))
                .render(StatusCode::BAD_REQUEST),
            AppError::Internal(msg) => {
                // Emitted inside the INFO request span, which carries method and uri.
                tracing::error!(error = %msg, "storage failure");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal Server Error",
                )
            }
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
