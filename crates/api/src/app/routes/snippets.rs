use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form,
};

use snippetbox_core::{CreateSnippetForm, SnippetId};

use crate::app::dto::{FormState, TemplateData};
use crate::app::errors::AppError;
use crate::app::routes::snippet_view_path;
use crate::context::AppContext;

/// `GET /`: the latest active snippets, newest first. An empty list is
/// rendered like any other.
pub async fn home(
    Extension(ctx): Extension<Arc<AppContext>>,
) -> Result<axum::response::Response, AppError> {
    let snippets = ctx.snippets().latest().await?;
    Ok(TemplateData::new()
        .with_snippets(snippets)
        .render(StatusCode::OK))
}

/// `GET /snippet/view/{id}`: a single active snippet.
///
/// A malformed id (non-numeric, zero, negative) is "not found" and never
/// reaches storage.
pub async fn view(
    Extension(ctx): Extension<Arc<AppContext>>,
    Path(raw_id): Path<String>,
) -> Result<axum::response::Response, AppError> {
    let id: SnippetId = raw_id.parse().map_err(|_| AppError::NotFound)?;

    let snippet = ctx.snippets().get(id).await?;
    Ok(TemplateData::new()
        .with_snippet(snippet)
        .render(StatusCode::OK))
}

/// `GET /snippet/create`: the empty create form.
pub async fn create_form() -> axum::response::Response {
    TemplateData::new()
        .with_form(FormState::empty())
        .render(StatusCode::OK)
}

/// `POST /snippet/create`: validate, insert, then redirect (303) to the new
/// snippet so a reload does not resubmit the form.
pub async fn create_submit(
    Extension(ctx): Extension<Arc<AppContext>>,
    Form(form): Form<CreateSnippetForm>,
) -> Result<axum::response::Response, AppError> {
    let new = match form.validate() {
        Ok(new) => new,
        Err(e) => return Err(AppError::from_domain(e, form)),
    };

    let id = ctx.snippets().insert(new).await?;
    tracing::info!(snippet_id = %id, "snippet created");

    Ok(Redirect::to(&snippet_view_path(id)).into_response())
}
