//! Key-value storage
//!
//! The registry and the redemption guard only need three operations from a
//! store: an atomic "set if absent" with optional expiry, a point read, and a
//! prefix scan. Every backend must make `set_if_absent` a single indivisible
//! operation; that is the whole single-use guarantee.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub mod config;
mod memory;
mod postgres;
mod redis;

pub use self::{memory::MemoryStore, postgres::PgStore, redis::RedisStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error")]
    Redis(#[from] ::redis::RedisError),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("ttl must be positive and representable")]
    InvalidTtl,

    #[error("failed to encode or decode stored value")]
    Serde(#[from] serde_json::Error),
}

#[automock]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Write `value` under `key` unless a live value is already there.
    ///
    /// Returns `true` when this call wrote the value. Expired values count as
    /// absent.
    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError>;

    /// Read the live value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Read every live value whose key starts with `prefix`, ordered by key.
    async fn values_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Round-trip to the backend.
    async fn ping(&self) -> Result<(), StoreError>;
}

pub(crate) fn ttl_millis(ttl: Duration) -> Result<u64, StoreError> {
    u64::try_from(ttl.as_millis())
        .ok()
        .filter(|millis| *millis > 0)
        .ok_or(StoreError::InvalidTtl)
}
