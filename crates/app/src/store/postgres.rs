//! `PostgreSQL` store
//!
//! Entries live in `kv_entries`. `set_if_absent` is one `INSERT ... ON CONFLICT`
//! statement, so concurrent writers are serialised by the primary key.

use std::time::Duration;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{PgPool, query_scalar};

use super::{KeyValueStore, StoreError};

const SET_IF_ABSENT_SQL: &str = r"
    INSERT INTO kv_entries (key, value, expires_at)
    VALUES ($1, $2, $3)
    ON CONFLICT (key) DO UPDATE
        SET value = EXCLUDED.value,
            expires_at = EXCLUDED.expires_at
        WHERE kv_entries.expires_at IS NOT NULL
          AND kv_entries.expires_at <= $4
    RETURNING key
";

const GET_SQL: &str = r"
    SELECT value
    FROM kv_entries
    WHERE key = $1
      AND (expires_at IS NULL OR expires_at > $2)
";

const VALUES_WITH_PREFIX_SQL: &str = r#"
    SELECT value
    FROM kv_entries
    WHERE starts_with(key, $1)
      AND (expires_at IS NULL OR expires_at > $2)
    ORDER BY key COLLATE "C"
"#;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for PgStore {
    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        let now = Timestamp::now();

        let expires_at = ttl
            .map(|ttl| {
                let ttl = SignedDuration::try_from(ttl).map_err(|_overflow| StoreError::InvalidTtl)?;

                if ttl.is_zero() {
                    return Err(StoreError::InvalidTtl);
                }

                now.checked_add(ttl).map_err(|_overflow| StoreError::InvalidTtl)
            })
            .transpose()?;

        let written: Option<String> = query_scalar(SET_IF_ABSENT_SQL)
            .bind(key)
            .bind(value)
            .bind(expires_at.map(SqlxTimestamp::from))
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&self.pool)
            .await?;

        Ok(written.is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(query_scalar(GET_SQL)
            .bind(key)
            .bind(SqlxTimestamp::from(Timestamp::now()))
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn values_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(query_scalar(VALUES_WITH_PREFIX_SQL)
            .bind(prefix)
            .bind(SqlxTimestamp::from(Timestamp::now()))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        Ok(())
    }
}
