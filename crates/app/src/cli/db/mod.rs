use clap::{Args, Subcommand};
use coupons_app::store::config::StoreConfig;

mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Create or upgrade the `kv_entries` table
    Migrate,
}

pub(crate) async fn run(command: DbCommand, store: &StoreConfig) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate => migrate::run(store).await,
    }
}
