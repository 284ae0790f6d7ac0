//! Collaborator seams for the importer and the query path.

use async_trait::async_trait;
use chargedb_core::ChargerRecord;

use crate::error::{SourceError, StoreError};

/// Upstream provider of raw charger records.
#[async_trait]
pub trait ChargerSource: Send + Sync {
    /// Fetches the full current snapshot as raw JSON objects.
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, SourceError>;
}

/// Key-value charger table with a secondary index on `town`.
///
/// Writes are overwrite-by-key and atomic per record; batches are bounded by
/// [`chargedb_core::MAX_BATCH_SIZE`] and are not transactional across calls.
#[async_trait]
pub trait ChargerStore: Send + Sync {
    /// Every stored `charger_id` (projection-only scan).
    async fn list_ids(&self) -> Result<Vec<String>, StoreError>;

    /// Upserts one batch, replacing any existing record with the same key.
    async fn put_batch(&self, chargers: &[ChargerRecord]) -> Result<(), StoreError>;

    /// Deletes one batch of keys. Missing keys are not an error.
    async fn delete_batch(&self, charger_ids: &[String]) -> Result<(), StoreError>;

    /// Records whose canonical town equals `town` and which have not expired
    /// at `now`.
    async fn query_by_town(&self, town: &str, now: i64) -> Result<Vec<ChargerRecord>, StoreError>;

    async fn get(&self, charger_id: &str) -> Result<Option<ChargerRecord>, StoreError>;

    /// Removes records whose TTL has passed; returns how many were removed.
    async fn purge_expired(&self, now: i64) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
