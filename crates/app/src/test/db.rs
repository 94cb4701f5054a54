//! `PostgreSQL` test databases
//!
//! One container is started per test binary and every `TestDb` gets its own
//! freshly migrated database inside it, so tests never see each other's rows.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;
use uuid::Uuid;

const USER: &str = "coupons_test";
const PASSWORD: &str = "coupons_test_password";

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("coupons_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn server_url() -> String {
    let container = POSTGRES_CONTAINER
        .get_or_init(init_postgres_container)
        .await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{USER}:{PASSWORD}@{host}:{port}")
}

#[derive(Debug, Clone)]
pub(crate) struct TestDb {
    pool: PgPool,
    url: String,
}

impl TestDb {
    /// Create and migrate an isolated database.
    pub(crate) async fn new() -> Self {
        let server = server_url().await;

        // Simple hex names need no quoting beyond the surrounding double quotes.
        let name = format!("coupons_{}", Uuid::now_v7().simple());

        let mut admin = PgConnection::connect(&format!("{server}/postgres"))
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("Failed to create test database");

        admin
            .close()
            .await
            .expect("Failed to close admin connection");

        let url = format!("{server}/{name}");

        let pool = PgPool::connect(&url)
            .await
            .expect("Failed to create pool for test database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, url }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn migrations_create_kv_entries() {
        let test_db = TestDb::new().await;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_entries")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to query kv_entries");

        assert_eq!(count, 0);
    }
}
