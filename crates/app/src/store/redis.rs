//! Redis store
//!
//! `set_if_absent` is a single `SET key value NX [PX ttl]`, which Redis
//! executes atomically. Expiry is left to Redis.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};

use super::{KeyValueStore, StoreError, ttl_millis};

const SCAN_BATCH: usize = 500;

#[derive(Clone)]
pub struct RedisStore {
    conn_manager: ConnectionManager,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Connect to Redis.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the first connection fails.
    pub async fn new(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)?;
        let conn_manager = ConnectionManager::new(client).await?;

        Ok(Self { conn_manager })
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn_manager.clone();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            keys.extend(batch);

            if next == 0 {
                break;
            }

            cursor = next;
        }

        // SCAN may return a key more than once.
        keys.sort_unstable();
        keys.dedup();

        Ok(keys)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn_manager.clone();

        let mut command = redis::cmd("SET");
        command.arg(key).arg(value).arg("NX");

        if let Some(ttl) = ttl {
            command.arg("PX").arg(ttl_millis(ttl)?);
        }

        // Redis answers `OK` when the key was written and nil when it already existed.
        let reply: Option<String> = command.query_async(&mut conn).await?;

        Ok(reply.is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn_manager.clone();

        Ok(conn.get(key).await?)
    }

    async fn values_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let keys = self.scan_keys(&format!("{}*", escape_glob(prefix))).await?;

        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn_manager.clone();

        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;

        // Keys that expired between SCAN and MGET come back as nil.
        Ok(values.into_iter().flatten().collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn_manager.clone();

        let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;

        Ok(())
    }
}

fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());

    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}
