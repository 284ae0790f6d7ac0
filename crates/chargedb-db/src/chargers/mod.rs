//! Database operations for the chargers table.

mod read;
mod types;
mod write;

pub use read::{get_charger, list_charger_ids, list_chargers_by_town};
pub use types::ChargerRow;
pub use write::{delete_chargers, purge_expired_chargers, upsert_chargers};
