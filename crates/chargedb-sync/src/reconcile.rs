//! Diff-based reconciliation of the store against the upstream snapshot.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use chargedb_core::{AppConfig, ChargerRecord, MAX_BATCH_SIZE};
use chargedb_ocm::{map_charger, parse_charger};

use crate::error::{BatchOperation, SyncError};
use crate::ports::{ChargerSource, ChargerStore};

/// Default record lifetime: two days.
pub const DEFAULT_TTL_SECS: i64 = 172_800;

/// Tunables for one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    pub ttl_secs: i64,
    batch_size: usize,
}

impl SyncSettings {
    /// `batch_size` is clamped into `1..=MAX_BATCH_SIZE`.
    #[must_use]
    pub fn new(ttl_secs: i64, batch_size: usize) -> Self {
        Self {
            ttl_secs,
            batch_size: batch_size.clamp(1, MAX_BATCH_SIZE),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(config.ttl_secs, config.batch_size)
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS, MAX_BATCH_SIZE)
    }
}

/// Pipeline stages of one pass. Logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Idle,
    Fetching,
    Mapping,
    Diffing,
    Writing,
    Done,
    Failed,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncStage::Idle => "idle",
            SyncStage::Fetching => "fetching",
            SyncStage::Mapping => "mapping",
            SyncStage::Diffing => "diffing",
            SyncStage::Writing => "writing",
            SyncStage::Done => "done",
            SyncStage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Outcome of a successful pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Raw records returned by the source, before de-duplication.
    pub fetched: usize,
    /// Records written (one per distinct `charger_id`).
    pub upserted: usize,
    /// Stale records removed.
    pub deleted: usize,
}

/// The writes one pass would issue.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    pub fetched: usize,
    /// Mapped records in upstream order, one per distinct `charger_id`.
    pub upserts: Vec<ChargerRecord>,
    /// Stored ids missing from the snapshot, sorted.
    pub stale_ids: Vec<String>,
}

impl SyncPlan {
    #[must_use]
    pub fn report(&self) -> SyncReport {
        SyncReport {
            fetched: self.fetched,
            upserted: self.upserts.len(),
            deleted: self.stale_ids.len(),
        }
    }
}

/// Makes the store's key set equal the upstream snapshot.
///
/// Upserts run before deletes, so a reader never sees a charger disappear
/// only to come back later in the same pass.
#[derive(Clone)]
pub struct Reconciler {
    source: Arc<dyn ChargerSource>,
    store: Arc<dyn ChargerStore>,
    settings: SyncSettings,
}

impl Reconciler {
    #[must_use]
    pub fn new(
        source: Arc<dyn ChargerSource>,
        store: Arc<dyn ChargerStore>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            source,
            store,
            settings,
        }
    }

    /// Runs one pass stamped with the current time.
    ///
    /// # Errors
    ///
    /// See [`Reconciler::run_at`].
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        self.run_at(crate::now_epoch_secs()).await
    }

    /// Runs one pass, computing TTLs from `now` (Unix epoch seconds).
    ///
    /// # Errors
    ///
    /// - [`SyncError::SourceUnavailable`] if the fetch fails. Nothing is written.
    /// - [`SyncError::Mapping`] if any record cannot be mapped. Nothing is written.
    /// - [`SyncError::StoreRead`] if the key scan fails. Nothing is written.
    /// - [`SyncError::Write`] if a batch fails. Earlier batches stay committed.
    pub async fn run_at(&self, now: i64) -> Result<SyncReport, SyncError> {
        enter(SyncStage::Idle);
        match self.execute(now).await {
            Ok(report) => {
                enter(SyncStage::Done);
                tracing::info!(
                    fetched = report.fetched,
                    upserted = report.upserted,
                    deleted = report.deleted,
                    "charger sync complete"
                );
                Ok(report)
            }
            Err(err) => {
                enter(SyncStage::Failed);
                tracing::error!(
                    stage = %err.stage(),
                    kind = %err.kind(),
                    error = %err,
                    "charger sync failed"
                );
                Err(err)
            }
        }
    }

    /// Fetches, maps, and diffs without writing anything.
    ///
    /// # Errors
    ///
    /// [`SyncError::SourceUnavailable`], [`SyncError::Mapping`], or
    /// [`SyncError::StoreRead`], as for [`Reconciler::run_at`].
    pub async fn plan_at(&self, now: i64) -> Result<SyncPlan, SyncError> {
        enter(SyncStage::Fetching);
        let raw = self
            .source
            .fetch()
            .await
            .map_err(SyncError::SourceUnavailable)?;
        let fetched = raw.len();

        enter(SyncStage::Mapping);
        let upserts = map_snapshot(raw, now, self.settings.ttl_secs)?;
        if upserts.len() < fetched {
            tracing::warn!(
                fetched,
                distinct = upserts.len(),
                "upstream returned duplicate charger ids; keeping the last occurrence"
            );
        }

        enter(SyncStage::Diffing);
        let existing = self.store.list_ids().await.map_err(SyncError::StoreRead)?;
        let stale_ids = find_stale_ids(&upserts, existing);
        if upserts.is_empty() && !stale_ids.is_empty() {
            tracing::warn!(
                stale = stale_ids.len(),
                "upstream returned no chargers; every stored charger will be removed"
            );
        }

        Ok(SyncPlan {
            fetched,
            upserts,
            stale_ids,
        })
    }

    async fn execute(&self, now: i64) -> Result<SyncReport, SyncError> {
        let plan = self.plan_at(now).await?;

        enter(SyncStage::Writing);
        let batch_size = self.settings.batch_size;
        for (batch_index, batch) in plan.upserts.chunks(batch_size).enumerate() {
            tracing::debug!(batch_index, size = batch.len(), "upserting charger batch");
            self.store
                .put_batch(batch)
                .await
                .map_err(|source| SyncError::Write {
                    operation: BatchOperation::Upsert,
                    batch_index,
                    committed: batch_index * batch_size,
                    source,
                })?;
        }
        for (batch_index, batch) in plan.stale_ids.chunks(batch_size).enumerate() {
            tracing::debug!(batch_index, size = batch.len(), "deleting stale charger batch");
            self.store
                .delete_batch(batch)
                .await
                .map_err(|source| SyncError::Write {
                    operation: BatchOperation::Delete,
                    batch_index,
                    committed: batch_index * batch_size,
                    source,
                })?;
        }

        Ok(plan.report())
    }
}

fn enter(stage: SyncStage) {
    tracing::debug!(%stage, "charger sync stage");
}

/// Parses and maps every raw record, collapsing duplicate ids.
///
/// A later duplicate replaces the earlier one but keeps its position, so
/// batch composition stays stable across passes.
fn map_snapshot(
    raw: Vec<serde_json::Value>,
    now: i64,
    ttl_secs: i64,
) -> Result<Vec<ChargerRecord>, SyncError> {
    let mut records: Vec<ChargerRecord> = Vec::with_capacity(raw.len());
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(raw.len());

    for (index, value) in raw.into_iter().enumerate() {
        let record = map_charger(parse_charger(value, index)?, index, now, ttl_secs)?;
        match positions.get(&record.charger_id) {
            Some(&pos) => records[pos] = record,
            None => {
                positions.insert(record.charger_id.clone(), records.len());
                records.push(record);
            }
        }
    }
    Ok(records)
}

/// Stored ids absent from the snapshot, sorted for deterministic batching.
fn find_stale_ids(records: &[ChargerRecord], existing: Vec<String>) -> Vec<String> {
    let current: HashSet<&str> = records.iter().map(|r| r.charger_id.as_str()).collect();
    let mut stale: Vec<String> = existing
        .into_iter()
        .filter(|id| !current.contains(id.as_str()))
        .collect();
    stale.sort_unstable();
    stale.dedup();
    stale
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
