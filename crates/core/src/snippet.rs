//! The snippet entity and its creation input.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult, FieldErrors};
use crate::id::SnippetId;

/// Maximum number of snippets returned by a "latest" query.
pub const LATEST_LIMIT: usize = 10;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// A persisted snippet.
///
/// Immutable once stored. A snippet whose `expires` is not in the future is
/// inert: stores never return it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// Active iff the expiry is strictly after `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}

impl Entity for Snippet {
    type Id = SnippetId;

    fn id(&self) -> SnippetId {
        self.id
    }
}

/// Lifetime of a snippet in days, restricted to the options offered by the
/// create form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ExpiryDays(u32);

impl ExpiryDays {
    pub const ONE_DAY: Self = Self(1);
    pub const ONE_WEEK: Self = Self(7);
    pub const ONE_YEAR: Self = Self(365);

    pub const ALLOWED: [Self; 3] = [Self::ONE_DAY, Self::ONE_WEEK, Self::ONE_YEAR];

    pub fn days(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::days(i64::from(self.0))
    }

    /// Expiry timestamp for a snippet created at `created`.
    pub fn expires_from(&self, created: DateTime<Utc>) -> DateTime<Utc> {
        created + self.as_duration()
    }
}

impl Default for ExpiryDays {
    fn default() -> Self {
        Self::ONE_YEAR
    }
}

impl TryFrom<u32> for ExpiryDays {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALLOWED
            .into_iter()
            .find(|allowed| allowed.0 == value)
            .ok_or_else(|| {
                let mut errs = FieldErrors::new();
                errs.add("expires", "This field must equal 1, 7 or 365");
                DomainError::Validation(errs)
            })
    }
}

impl From<ExpiryDays> for u32 {
    fn from(value: ExpiryDays) -> Self {
        value.0
    }
}

/// Validated input for a store insert.
///
/// Only constructible through [`NewSnippet::new`] (or form validation), so a
/// store never sees a blank title or content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    title: String,
    content: String,
    expires: ExpiryDays,
}

impl NewSnippet {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        expires: ExpiryDays,
    ) -> DomainResult<Self> {
        let title = title.into();
        let content = content.into();

        let mut errs = FieldErrors::new();
        check_title(&title, &mut errs);
        check_content(&content, &mut errs);
        if !errs.is_empty() {
            return Err(DomainError::Validation(errs));
        }

        Ok(Self {
            title,
            content,
            expires,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn expires(&self) -> ExpiryDays {
        self.expires
    }

    /// Materialise the stored record for an id assigned at `created`.
    pub fn into_snippet(self, id: SnippetId, created: DateTime<Utc>) -> Snippet {
        Snippet {
            id,
            expires: self.expires.expires_from(created),
            title: self.title,
            content: self.content,
            created,
        }
    }
}

pub(crate) fn check_title(title: &str, errs: &mut FieldErrors) {
    if title.trim().is_empty() {
        errs.add("title", "This field cannot be blank");
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errs.add(
            "title",
            format!("This field cannot be more than {TITLE_MAX_CHARS} characters long"),
        );
    }
}

pub(crate) fn check_content(content: &str, errs: &mut FieldErrors) {
    if content.trim().is_empty() {
        errs.add("content", "This field cannot be blank");
    }
}
