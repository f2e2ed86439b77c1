use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use snippetbox_core::{
    Clock, Entity, NewSnippet, Snippet, SnippetId, StoreError, StoreResult, SystemClock,
    LATEST_LIMIT,
};

use super::r#trait::SnippetStore;

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    snippets: BTreeMap<SnippetId, Snippet>,
}

/// In-memory snippet store.
///
/// Intended for tests/dev. Expired snippets are kept but never returned,
/// mirroring the persistent store.
pub struct InMemorySnippetStore {
    inner: RwLock<Inner>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemorySnippetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySnippetStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            clock,
        }
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .snippets
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::failure("lock poisoned")
}

#[async_trait]
impl SnippetStore for InMemorySnippetStore {
    async fn insert(&self, snippet: NewSnippet) -> StoreResult<SnippetId> {
        let created = self.clock.now();
        let mut inner = self.inner.write().map_err(poisoned)?;

        let id = SnippetId::new(inner.last_id + 1)
            .ok_or_else(|| StoreError::failure("id sequence exhausted"))?;
        inner.last_id = id.get();

        let stored = snippet.into_snippet(id, created);
        inner.snippets.insert(stored.id(), stored);
        Ok(id)
    }

    async fn get(&self, id: SnippetId) -> StoreResult<Snippet> {
        let now = self.clock.now();
        let inner = self.inner.read().map_err(poisoned)?;

        inner
            .snippets
            .get(&id)
            .filter(|s| s.is_active(now))
            .cloned()
            .ok_or(StoreError::NoRecord)
    }

    async fn latest(&self) -> StoreResult<Vec<Snippet>> {
        let now = self.clock.now();
        let inner = self.inner.read().map_err(poisoned)?;

        Ok(inner
            .snippets
            .values()
            .rev()
            .filter(|s| s.is_active(now))
            .take(LATEST_LIMIT)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{Duration, TimeZone, Utc};
    use snippetbox_core::{ExpiryDays, ManualClock};

    use super::*;

    fn new_snippet(title: &str, expires: ExpiryDays) -> NewSnippet {
        NewSnippet::new(title, "O snail\nClimb Mount Fuji,\nBut slowly, slowly!", expires).unwrap()
    }

    fn manual_store() -> (Arc<ManualClock>, InMemorySnippetStore) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        ));
        let store = InMemorySnippetStore::with_clock(clock.clone());
        (clock, store)
    }

    #[tokio::test]
    async fn insert_then_get_returns_submitted_values() {
        let (clock, store) = manual_store();
        let id = store.insert(new_snippet("O snail", ExpiryDays::ONE_WEEK)).await.unwrap();

        let snippet = store.get(id).await.unwrap();
        assert_eq!(snippet.id, id);
        assert_eq!(snippet.title, "O snail");
        assert!(snippet.content.starts_with("O snail\n"));
        assert_eq!(snippet.created, clock.now());
        assert_eq!(snippet.expires - snippet.created, Duration::days(7));
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let (_, store) = manual_store();
        let a = store.insert(new_snippet("a", ExpiryDays::ONE_DAY)).await.unwrap();
        let b = store.insert(new_snippet("b", ExpiryDays::ONE_DAY)).await.unwrap();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
    }

    #[tokio::test]
    async fn unknown_id_is_no_record() {
        let (_, store) = manual_store();
        let err = store.get(SnippetId::new(99).unwrap()).await.unwrap_err();
        assert_eq!(err, StoreError::NoRecord);
    }

    #[tokio::test]
    async fn expired_snippet_is_indistinguishable_from_missing() {
        let (clock, store) = manual_store();
        let id = store.insert(new_snippet("brief", ExpiryDays::ONE_DAY)).await.unwrap();
        assert!(store.get(id).await.is_ok());

        // Exactly at the expiry instant the snippet is no longer active.
        clock.advance(Duration::days(1));
        assert_eq!(store.get(id).await.unwrap_err(), StoreError::NoRecord);
        assert!(store.latest().await.unwrap().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn latest_on_empty_store_is_empty() {
        let (_, store) = manual_store();
        assert!(store.latest().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn latest_returns_ten_newest_active_descending() {
        let (clock, store) = manual_store();

        // Two short-lived snippets that will be expired at query time.
        for i in 0..2 {
            store.insert(new_snippet(&format!("short {i}"), ExpiryDays::ONE_DAY)).await.unwrap();
        }
        for i in 0..12 {
            store.insert(new_snippet(&format!("long {i}"), ExpiryDays::ONE_YEAR)).await.unwrap();
        }
        // Most recent ones expire too; they must be skipped, not counted.
        for i in 0..3 {
            store.insert(new_snippet(&format!("late short {i}"), ExpiryDays::ONE_DAY)).await.unwrap();
        }
        clock.advance(Duration::days(2));

        let latest = store.latest().await.unwrap();
        assert_eq!(latest.len(), LATEST_LIMIT);

        let now = clock.now();
        assert!(latest.iter().all(|s| s.is_active(now)));
        assert!(latest.windows(2).all(|w| w[0].id > w[1].id));
        assert_eq!(latest[0].title, "long 11");
        assert_eq!(latest[9].title, "long 2");
    }

    #[tokio::test]
    async fn reads_do_not_mutate() {
        let (_, store) = manual_store();
        let id = store.insert(new_snippet("a", ExpiryDays::ONE_WEEK)).await.unwrap();
        let before = store.get(id).await.unwrap();
        let _ = store.latest().await.unwrap();
        let _ = store.get(SnippetId::new(42).unwrap()).await;
        assert_eq!(store.get(id).await.unwrap(), before);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_get_distinct_retrievable_ids() {
        let store = Arc::new(InMemorySnippetStore::new());

        let handles: Vec<_> = (0..100)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let title = format!("snippet {i}");
                    let id = store.insert(new_snippet(&title, ExpiryDays::ONE_WEEK)).await.unwrap();
                    (id, title)
                })
            })
            .collect();

        let mut ids = HashSet::new();
        let mut inserted = Vec::new();
        for h in handles {
            let (id, title) = h.await.unwrap();
            assert!(ids.insert(id), "duplicate id {id}");
            inserted.push((id, title));
        }

        assert_eq!(store.len(), 100);
        for (id, title) in inserted {
            assert_eq!(store.get(id).await.unwrap().title, title);
        }
    }

    #[tokio::test]
    async fn len_still_counts_after_lock_is_poisoned() {
        let store = Arc::new(InMemorySnippetStore::new());
        store.insert(new_snippet("one", ExpiryDays::ONE_DAY)).await.unwrap();
        store.insert(new_snippet("two", ExpiryDays::ONE_DAY)).await.unwrap();

        let s = store.clone();
        let poisoner = std::thread::spawn(move || {
            let _guard = s.inner.write().unwrap();
            panic!("writer died holding the lock");
        });
        assert!(poisoner.join().is_err());
        assert!(store.inner.is_poisoned());

        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }
}
