//! Postgres-backed snippet store.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | StoreError | Scenario |
//! |------------|------------|----------|
//! | RowNotFound | `NoRecord` | `get()` found no active row |
//! | Database (any code) | `StorageFailure` | Constraint violation, malformed query |
//! | PoolClosed / PoolTimedOut | `StorageFailure` | Pool shut down or exhausted |
//! | Other | `StorageFailure` | Network errors, decode failures, etc. |
//!
//! "Now" is always the database clock, so expiry filtering is consistent
//! across application instances.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use snippetbox_core::{NewSnippet, Snippet, SnippetId, StoreError, StoreResult, LATEST_LIMIT};

use super::r#trait::SnippetStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS snippets (
    id      BIGSERIAL PRIMARY KEY,
    title   VARCHAR(100) NOT NULL,
    content TEXT NOT NULL,
    created TIMESTAMPTZ NOT NULL,
    expires TIMESTAMPTZ NOT NULL,
    CONSTRAINT snippets_expires_after_created CHECK (expires >= created)
);
CREATE INDEX IF NOT EXISTS idx_snippets_created ON snippets (created);
"#;

/// Postgres-backed snippet store.
///
/// ## Thread Safety
///
/// Uses the SQLx connection pool, which is cheap to clone and hands each
/// query its own physical connection. No extra locking is needed: inserts
/// rely on the `BIGSERIAL` sequence for unique ids and reads see committed
/// rows only. No transaction spans more than one statement.
#[derive(Debug, Clone)]
pub struct PostgresSnippetStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct SnippetRow {
    id: i64,
    title: String,
    content: String,
    created: DateTime<Utc>,
    expires: DateTime<Utc>,
}

impl TryFrom<SnippetRow> for Snippet {
    type Error = StoreError;

    fn try_from(row: SnippetRow) -> Result<Self, Self::Error> {
        let id = SnippetId::new(row.id)
            .ok_or_else(|| StoreError::failure(format!("stored snippet has invalid id {}", row.id)))?;
        Ok(Snippet {
            id,
            title: row.title,
            content: row.content,
            created: row.created,
            expires: row.expires,
        })
    }
}

impl PostgresSnippetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url` and verify connectivity.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        Ok(Self::new(pool))
    }

    /// Create the `snippets` table and its index if missing.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SnippetStore for PostgresSnippetStore {
    #[instrument(
        skip(self, snippet),
        fields(expires_days = snippet.expires().days())
    )]
    async fn insert(&self, snippet: NewSnippet) -> StoreResult<SnippetId> {
        let days = i32::try_from(snippet.expires().days())
            .map_err(|e| StoreError::failure(format!("expiry out of range: {e}")))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES ($1, $2, now(), now() + make_interval(days => $3))
            RETURNING id
            "#,
        )
        .bind(snippet.title())
        .bind(snippet.content())
        .bind(days)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        SnippetId::new(id).ok_or_else(|| StoreError::failure(format!("database assigned invalid id {id}")))
    }

    #[instrument(skip(self))]
    async fn get(&self, id: SnippetId) -> StoreResult<Snippet> {
        let row: SnippetRow = sqlx::query_as(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > now() AND id = $1
            "#,
        )
        .bind(id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get", e))?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn latest(&self) -> StoreResult<Vec<Snippet>> {
        let rows: Vec<SnippetRow> = sqlx::query_as(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > now()
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(LATEST_LIMIT as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("latest", e))?;

        rows.into_iter().map(Snippet::try_from).collect()
    }
}

/// Classify an SQLx error. Only `RowNotFound` carries meaning for callers.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NoRecord,
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            StoreError::failure(format!(
                "database error in {operation} (code {code}): {}",
                db_err.message()
            ))
        }
        sqlx::Error::PoolClosed => {
            StoreError::failure(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::failure(format!("timed out acquiring connection in {operation}"))
        }
        other => StoreError::failure(format!("sqlx error in {operation}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_no_record() {
        assert_eq!(
            map_sqlx_error("get", sqlx::Error::RowNotFound),
            StoreError::NoRecord
        );
    }

    #[test]
    fn pool_errors_map_to_storage_failure_with_operation() {
        match map_sqlx_error("insert", sqlx::Error::PoolClosed) {
            StoreError::StorageFailure(msg) => assert!(msg.contains("insert")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            map_sqlx_error("latest", sqlx::Error::PoolTimedOut),
            StoreError::StorageFailure(_)
        ));
    }

    #[test]
    fn row_with_non_positive_id_is_rejected() {
        let row = SnippetRow {
            id: 0,
            title: "t".into(),
            content: "c".into(),
            created: Utc::now(),
            expires: Utc::now(),
        };
        assert!(matches!(Snippet::try_from(row), Err(StoreError::StorageFailure(_))));
    }

    /// Uses a throwaway schema so the empty-store case is observable.
    #[tokio::test]
    #[ignore = "requires a live Postgres at DATABASE_URL"]
    async fn round_trip_against_live_database() {
        use sqlx::Executor;

        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let schema = format!("snippetbox_test_{}", std::process::id());

        let admin = PgPool::connect(&url).await.unwrap();
        sqlx::raw_sql(&format!("DROP SCHEMA IF EXISTS {schema} CASCADE; CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .unwrap();

        let search_path = format!("SET search_path TO {schema}");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .after_connect(move |conn, _meta| {
                let sql = search_path.clone();
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await
            .unwrap();
        let store = PostgresSnippetStore::new(pool);
        store.ensure_schema().await.unwrap();

        assert!(store.latest().await.unwrap().is_empty());

        let new = NewSnippet::new("O snail", "Climb Mount Fuji", snippetbox_core::ExpiryDays::ONE_WEEK)
            .unwrap();
        let id = store.insert(new).await.unwrap();
        let snippet = store.get(id).await.unwrap();
        assert_eq!(snippet.title, "O snail");
        assert_eq!(snippet.expires - snippet.created, chrono::Duration::days(7));

        let expired: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES ('gone', 'long gone', now() - interval '8 days', now() - interval '1 day')
            RETURNING id
            "#,
        )
        .fetch_one(store.pool())
        .await
        .unwrap();
        let expired = SnippetId::new(expired).unwrap();
        assert!(expired > id);
        assert_eq!(store.get(expired).await.unwrap_err(), StoreError::NoRecord);

        let latest = store.latest().await.unwrap();
        assert_eq!(latest.iter().map(|s| s.id).collect::<Vec<_>>(), vec![id]);

        store.pool().close().await;
        sqlx::raw_sql(&format!("DROP SCHEMA {schema} CASCADE"))
            .execute(&admin)
            .await
            .unwrap();
    }
}
