use clap::{Parser, Subcommand};
use coupons_app::{context::AppContext, store::config::StoreConfig};

mod coupon;
mod db;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "coupons-app", about = "Coupons CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    store: StoreConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Coupon(coupon::CouponCommand),
    Seed,
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Coupon(command) => coupon::run(command, &context(&self.store).await?).await,
            Commands::Seed => seed::run(&context(&self.store).await?).await,
            Commands::Db(command) => db::run(command, &self.store).await,
        }
    }
}

async fn context(store: &StoreConfig) -> Result<AppContext, String> {
    AppContext::from_store_config(store)
        .await
        .map_err(|error| format!("failed to open store: {error}"))
}
