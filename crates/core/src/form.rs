//! Create-snippet form: raw submitted values and their validation.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, FieldErrors};
use crate::snippet::{check_content, check_title, ExpiryDays, NewSnippet};

/// Values exactly as submitted by the client.
///
/// Every field is kept as text so that a missing or garbled value becomes a
/// field error rather than a rejected request body, and can be echoed back
/// for redisplay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSnippetForm {
    pub title: String,
    pub content: String,
    pub expires: String,
}

impl Default for CreateSnippetForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            expires: ExpiryDays::default().days().to_string(),
        }
    }
}

impl CreateSnippetForm {
    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> DomainResult<NewSnippet> {
        let mut errs = FieldErrors::new();
        check_title(&self.title, &mut errs);
        check_content(&self.content, &mut errs);

        let expires = self
            .expires
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|days| ExpiryDays::try_from(days).ok());
        if expires.is_none() {
            errs.add("expires", "This field must equal 1, 7 or 365");
        }

        match expires {
            Some(expires) if errs.is_empty() => NewSnippet::new(self.title.as_str(), self.content.as_str(), expires),
            _ => Err(DomainError::Validation(errs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(title: &str, content: &str, expires: &str) -> CreateSnippetForm {
        CreateSnippetForm {
            title: title.to_string(),
            content: content.to_string(),
            expires: expires.to_string(),
        }
    }

    fn field_errors(result: DomainResult<NewSnippet>) -> FieldErrors {
        match result {
            Err(DomainError::Validation(errs)) => errs,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_form_produces_new_snippet() {
        let new = form("O snail", "Climb Mount Fuji,\nBut slowly, slowly!", "7")
            .validate()
            .unwrap();
        assert_eq!(new.title(), "O snail");
        assert_eq!(new.expires(), ExpiryDays::ONE_WEEK);
    }

    #[test]
    fn default_form_preselects_one_year() {
        assert_eq!(CreateSnippetForm::default().expires, "365");
    }

    #[test]
    fn collects_every_field_error() {
        let errs = field_errors(form("", "", "abc").validate());
        assert_eq!(errs.len(), 3);
        assert_eq!(errs.get("title"), Some("This field cannot be blank"));
        assert_eq!(errs.get("content"), Some("This field cannot be blank"));
        assert_eq!(errs.get("expires"), Some("This field must equal 1, 7 or 365"));
    }

    #[test]
    fn rejects_overlong_title() {
        let errs = field_errors(form(&"x".repeat(101), "body", "1").validate());
        assert_eq!(
            errs.get("title"),
            Some("This field cannot be more than 100 characters long")
        );
        assert!(form(&"é".repeat(100), "body", "1").validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let parsed: CreateSnippetForm = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(parsed.content, "");
        assert_eq!(parsed.expires, "365");
    }

    proptest! {
        #[test]
        fn only_offered_expiry_values_validate(days in 0u32..1000) {
            let result = form("title", "content", &days.to_string()).validate();
            prop_assert_eq!(result.is_ok(), matches!(days, 1 | 7 | 365));
        }

        #[test]
        fn non_blank_short_titles_validate(title in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,98}") {
            prop_assert!(form(&title, "content", "1").validate().is_ok());
        }
    }
}
