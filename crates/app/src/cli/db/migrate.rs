use coupons_app::{database, store::config::StoreConfig};

pub(crate) async fn run(store: &StoreConfig) -> Result<(), String> {
    let Some(database_url) = store.database_url.as_deref() else {
        return Err("DATABASE_URL is required to run migrations".to_string());
    };

    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}
