//! SQLite-backed key store.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::domain::CredentialRecord;
use crate::error::KeyResult;
use crate::storage::models::ApiKeyRow;
use crate::storage::KeyStore;

/// Key store persisting records in the `api_keys` table.
#[derive(Clone)]
pub struct SqliteKeyStore {
    pool: SqlitePool,
}

impl SqliteKeyStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init_schema(&self) -> KeyResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS api_keys (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE CHECK (length(name) <= 200),
                hash TEXT NOT NULL CHECK (length(hash) <= 500),
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_api_keys_hash ON api_keys(hash);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl KeyStore for SqliteKeyStore {
    async fn upsert_hash(&self, name: &str, hash: &str) -> KeyResult<()> {
        let now = chrono::Utc::now().to_rfc3339();

        // Single statement so concurrent re-issues resolve to the last committed write.
        sqlx::query(
            r#"
            INSERT INTO api_keys (name, hash, created_at) VALUES (?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                hash = excluded.hash,
                created_at = excluded.created_at
            "#,
        )
        .bind(name)
        .bind(hash)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_hash(&self, candidate: &str) -> KeyResult<Option<String>> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT hash FROM api_keys WHERE hash = ? LIMIT 1")
                .bind(candidate)
                .fetch_optional(&self.pool)
                .await?;

        Ok(hash)
    }

    async fn list_all(&self) -> KeyResult<Vec<CredentialRecord>> {
        let rows: Vec<ApiKeyRow> =
            sqlx::query_as("SELECT id, name, hash, created_at FROM api_keys ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn delete(&self, name: &str) -> KeyResult<()> {
        sqlx::query("DELETE FROM api_keys WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> KeyResult<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
