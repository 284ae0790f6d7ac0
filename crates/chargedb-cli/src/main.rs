mod chargers;
mod db;
mod sync;

use std::sync::Arc;

use chargedb_core::AppConfig;
use chargedb_db::ChargerTable;
use chargedb_sync::PgChargerStore;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;

#[derive(Debug, Parser)]
#[command(name = "chargedb-cli")]
#[command(about = "EV charger directory command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile the charger table against `OpenChargeMap`
    Sync {
        /// Fetch and diff only; print what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// List stored chargers for a town
    Chargers {
        /// Canonical town name (e.g. Belgrade); percent-encoding is accepted
        town: String,
        /// Print the raw JSON response instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one stored charger as JSON
    Show {
        /// Charger id (the upstream `ID`)
        charger_id: String,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("chargedb-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = chargedb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = connect_store(&config).await?;

    match command {
        Commands::Sync { dry_run } => sync::run_sync(&config, store, dry_run).await,
        Commands::Chargers { town, json } => {
            chargers::run_chargers_by_town(store.as_ref(), &town, json).await
        }
        Commands::Show { charger_id } => {
            chargers::run_show_charger(store.as_ref(), &charger_id).await
        }
        Commands::Db { command } => db::run_db(&command, &store).await,
    }
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<PgChargerStore>> {
    let pool_config = chargedb_db::PoolConfig::from_app_config(config);
    let pool = chargedb_db::connect_pool(&config.database_url, pool_config).await?;
    let table = ChargerTable::new(config.chargers_table.clone())?;
    Ok(Arc::new(PgChargerStore::new(pool, table)))
}

#[cfg(test)]
mod tests;
