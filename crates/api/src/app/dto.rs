//! Data handed to the rendering layer.
//!
//! Page templates are not part of this service; responses carry the
//! template data as JSON.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Serialize;

use snippetbox_core::{CreateSnippetForm, FieldErrors, Snippet};

/// Create-form state: submitted (or default) values plus any field errors.
#[derive(Debug, Clone, Serialize)]
pub struct FormState {
    #[serde(flatten)]
    pub values: CreateSnippetForm,
    pub field_errors: FieldErrors,
}

impl FormState {
    pub fn empty() -> Self {
        Self {
            values: CreateSnippetForm::default(),
            field_errors: FieldErrors::new(),
        }
    }

    pub fn with_errors(values: CreateSnippetForm, field_errors: FieldErrors) -> Self {
        Self {
            values,
            field_errors,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateData {
    pub current_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormState>,
}

impl Default for TemplateData {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateData {
    pub fn new() -> Self {
        Self {
            current_year: Utc::now().year(),
            snippet: None,
            snippets: Vec::new(),
            form: None,
        }
    }

    pub fn with_snippet(mut self, snippet: Snippet) -> Self {
        self.snippet = Some(snippet);
        self
    }

    pub fn with_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.snippets = snippets;
        self
    }

    pub fn with_form(mut self, form: FormState) -> Self {
        self.form = Some(form);
        self
    }

    pub fn render(self, status: StatusCode) -> axum::response::Response {
        (status, Json(self)).into_response()
    }
}
