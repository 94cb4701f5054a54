//! Server configuration module

use clap::Parser;
use coupons_app::store::config::StoreConfig;

use crate::config::{
    observability::{LoggingConfig, OtelConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod observability;
pub(crate) mod server;

/// Coupons JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "coupons-json", about = "Coupons JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Trace export settings.
    #[command(flatten)]
    pub otel: OtelConfig,

    /// Key-value store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Issue the demo coupons on startup, skipping codes that already exist.
    #[arg(long, env = "SEED_DEMO_COUPONS", default_value_t = false)]
    pub seed_demo_coupons: bool,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use coupons_app::store::config::StoreBackend;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_an_in_memory_store() -> TestResult {
        let config = ServerConfig::try_parse_from(["coupons-json"])?;

        assert_eq!(config.store.store_backend, StoreBackend::Memory);
        assert!(!config.seed_demo_coupons);
        assert!(!config.otel.otel_enabled);
        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.server.shutdown_grace().as_secs(), 10);

        Ok(())
    }

    #[test]
    fn accepts_store_and_seed_flags() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "coupons-json",
            "--port",
            "9000",
            "--store-backend",
            "redis",
            "--redis-url",
            "redis://localhost:6379",
            "--seed-demo-coupons",
        ])?;

        assert_eq!(config.store.store_backend, StoreBackend::Redis);
        assert_eq!(
            config.store.redis_url.as_deref(),
            Some("redis://localhost:6379")
        );
        assert!(config.seed_demo_coupons);
        assert_eq!(config.server.port, 9000);

        Ok(())
    }
}
