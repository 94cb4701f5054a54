//! Store Config

use clap::{Args, ValueEnum};

/// Which key-value backend holds coupons and redemptions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Process-local map; state is lost on restart.
    #[default]
    Memory,

    /// Redis, using `SET NX` for claims.
    Redis,

    /// `PostgreSQL`, using `INSERT ... ON CONFLICT` for claims.
    Postgres,
}

/// Storage settings.
#[derive(Clone, Debug, Args)]
pub struct StoreConfig {
    /// Storage backend (memory, redis, postgres)
    #[arg(long, env = "STORE_BACKEND", value_enum, default_value_t = StoreBackend::Memory)]
    pub store_backend: StoreBackend,

    /// Redis connection string, required for the redis backend
    #[arg(long, env = "REDIS_URL", hide_env_values = true)]
    pub redis_url: Option<String>,

    /// `PostgreSQL` connection string, required for the postgres backend
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Days to keep coupon records after they stop being valid; kept forever when unset
    #[arg(long, env = "COUPON_RETENTION_DAYS")]
    pub coupon_retention_days: Option<u32>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            redis_url: None,
            database_url: None,
            coupon_retention_days: None,
        }
    }
}
