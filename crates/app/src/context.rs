//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    database,
    domain::coupons::{CouponsService, StoreCouponsService},
    store::{
        KeyValueStore, MemoryStore, PgStore, RedisStore, StoreError,
        config::{StoreBackend, StoreConfig},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("the {backend} store requires {variable} to be set")]
    MissingUrl {
        backend: &'static str,
        variable: &'static str,
    },

    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to connect to redis")]
    Redis(#[source] StoreError),
}

#[derive(Clone)]
pub struct AppContext {
    pub coupons: Arc<dyn CouponsService>,
}

impl AppContext {
    /// Build application context from store settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the selected backend is missing its URL or cannot
    /// be reached.
    pub async fn from_store_config(config: &StoreConfig) -> Result<Self, AppInitError> {
        let store = open_store(config).await?;

        Ok(Self::from_store(store, config.coupon_retention_days))
    }

    #[must_use]
    pub fn from_store(store: Arc<dyn KeyValueStore>, retention_days: Option<u32>) -> Self {
        let mut service = StoreCouponsService::new(store);

        if let Some(days) = retention_days {
            service = service.with_retention_days(days);
        }

        Self {
            coupons: Arc::new(service),
        }
    }

    /// Context over a fresh process-local store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()), None)
    }
}

/// Open the store selected by `config`.
///
/// # Errors
///
/// Returns an error when the backend is missing its URL or cannot be reached.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, AppInitError> {
    let store: Arc<dyn KeyValueStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or(AppInitError::MissingUrl {
                backend: "redis",
                variable: "REDIS_URL",
            })?;

            Arc::new(RedisStore::new(url).await.map_err(AppInitError::Redis)?)
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(AppInitError::MissingUrl {
                    backend: "postgres",
                    variable: "DATABASE_URL",
                })?;

            let pool = database::connect(url)
                .await
                .map_err(AppInitError::Database)?;

            Arc::new(PgStore::new(pool))
        }
    };

    info!(backend = ?config.store_backend, "opened coupon store");

    Ok(store)
}
