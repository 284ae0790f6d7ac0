//! Database maintenance commands.

use clap::Subcommand;

use chargedb_sync::{now_epoch_secs, ChargerStore, PgChargerStore};

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Create the charger table and its indexes if missing
    Provision,
    /// Delete chargers whose TTL has passed
    PurgeExpired,
}

/// Runs a `db` sub-command against the configured table.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub(crate) async fn run_db(command: &DbCommands, store: &PgChargerStore) -> anyhow::Result<()> {
    match command {
        DbCommands::Ping => {
            store.ping().await?;
            println!("database ok");
        }
        DbCommands::Provision => {
            chargedb_db::provision_table(store.pool(), store.table()).await?;
            println!("table {} ready", store.table().name());
        }
        DbCommands::PurgeExpired => {
            let purged = store.purge_expired(now_epoch_secs()).await?;
            tracing::info!(purged, table = store.table().name(), "purged expired chargers");
            println!("purged {purged} expired charger(s)");
        }
    }
    Ok(())
}
