//! In-process store

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use jiff::Timestamp;

use super::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Timestamp>,
}

impl Entry {
    fn is_live(&self, now: Timestamp) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}

/// Store backed by a map behind a mutex.
///
/// The mutex makes `set_if_absent` atomic within one process. Nothing is shared
/// across processes, so this backend suits tests and single-node deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Entry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, Entry>> {
        // No operation leaves the map half-written, so a poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        let now = Timestamp::now();

        if ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(StoreError::InvalidTtl);
        }

        let expires_at = ttl
            .map(|ttl| now.checked_add(ttl).map_err(|_overflow| StoreError::InvalidTtl))
            .transpose()?;

        let mut entries = self.entries();

        if entries.get(key).is_some_and(|entry| entry.is_live(now)) {
            return Ok(false);
        }

        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at,
            },
        );

        Ok(true)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Timestamp::now();

        Ok(self
            .entries()
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn values_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let now = Timestamp::now();

        Ok(self
            .entries()
            .range(prefix.to_owned()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .filter(|(_, entry)| entry.is_live(now))
            .map(|(_, entry)| entry.value.clone())
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
