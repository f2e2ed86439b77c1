use std::sync::Arc;

use async_trait::async_trait;

use snippetbox_core::{NewSnippet, Snippet, SnippetId, StoreResult};

/// Snippet storage contract.
///
/// ## Semantics
///
/// - `insert()` stamps `created = now` and `expires = now + expiry days`, and
///   returns the newly assigned id. Ids are unique and increase with each
///   insert; concurrent inserts may be persisted in either order.
/// - `get()` returns the snippet only while it is active. An unknown id and an
///   expired id both yield `StoreError::NoRecord`.
/// - `latest()` returns up to `LATEST_LIMIT` active snippets, newest id first.
///   An empty store yields an empty vector, never an error.
///
/// Implementations never log; they classify failures into `NoRecord` or
/// `StorageFailure` and return them. Reads have no side effects.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    async fn insert(&self, snippet: NewSnippet) -> StoreResult<SnippetId>;

    async fn get(&self, id: SnippetId) -> StoreResult<Snippet>;

    async fn latest(&self) -> StoreResult<Vec<Snippet>>;
}

#[async_trait]
impl<S> SnippetStore for Arc<S>
where
    S: SnippetStore + ?Sized,
{
    async fn insert(&self, snippet: NewSnippet) -> StoreResult<SnippetId> {
        (**self).insert(snippet).await
    }

    async fn get(&self, id: SnippetId) -> StoreResult<Snippet> {
        (**self).get(id).await
    }

    async fn latest(&self) -> StoreResult<Vec<Snippet>> {
        (**self).latest().await
    }
}
