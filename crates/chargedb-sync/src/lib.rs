//! Charger import and lookup.
//!
//! [`Reconciler`] pulls the upstream snapshot through a [`ChargerSource`],
//! maps it, and makes a [`ChargerStore`] match it exactly. The query side
//! ([`get_chargers_by_town`]) only reads. Both take their collaborators as
//! trait objects so callers can swap in the in-memory fakes from
//! `test_support`.

pub mod adapters;
pub mod error;
pub mod ports;
pub mod query;
pub mod reconcile;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use adapters::PgChargerStore;
pub use error::{BatchOperation, ErrorKind, QueryError, SourceError, StoreError, SyncError};
pub use ports::{ChargerSource, ChargerStore};
pub use query::{decode_town, get_chargers_by_town, TownChargers};
pub use reconcile::{Reconciler, SyncPlan, SyncReport, SyncSettings, SyncStage};

/// Current wall-clock time in Unix epoch seconds.
#[must_use]
pub fn now_epoch_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
