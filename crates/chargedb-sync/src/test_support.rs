//! In-memory fakes for the source and store seams.
//!
//! Compiled for this crate's tests and, behind the `test-support` feature,
//! for downstream crates' tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chargedb_core::{ChargerRecord, MAX_BATCH_SIZE};
use serde_json::Value;

use crate::error::{SourceError, StoreError};
use crate::ports::{ChargerSource, ChargerStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A source that returns a fixed snapshot, or a fixed failure.
#[derive(Debug)]
pub struct StaticChargerSource {
    snapshot: Mutex<Result<Vec<Value>, String>>,
}

impl StaticChargerSource {
    #[must_use]
    pub fn new(snapshot: Vec<Value>) -> Self {
        Self {
            snapshot: Mutex::new(Ok(snapshot)),
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            snapshot: Mutex::new(Err(message.into())),
        }
    }

    /// Replaces what subsequent fetches return.
    pub fn set_snapshot(&self, snapshot: Vec<Value>) {
        *lock(&self.snapshot) = Ok(snapshot);
    }
}

#[async_trait]
impl ChargerSource for StaticChargerSource {
    async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        lock(&self.snapshot).clone().map_err(SourceError::Other)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    records: BTreeMap<String, ChargerRecord>,
    put_batches: Vec<usize>,
    delete_batches: Vec<usize>,
    fail_put_at: Option<usize>,
    fail_delete_at: Option<usize>,
    fail_reads: bool,
}

/// A store keyed by `charger_id` that records every batch it receives.
///
/// Rejects batches larger than [`MAX_BATCH_SIZE`] the way the real store
/// does, and can be told to fail a specific batch or every read.
#[derive(Debug, Default)]
pub struct MemoryChargerStore {
    state: Mutex<MemoryState>,
}

impl MemoryChargerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = ChargerRecord>) -> Self {
        let store = Self::new();
        {
            let mut state = lock(&store.state);
            for record in records {
                state.records.insert(record.charger_id.clone(), record);
            }
        }
        store
    }

    /// Stored records ordered by `charger_id`.
    #[must_use]
    pub fn records(&self) -> Vec<ChargerRecord> {
        lock(&self.state).records.values().cloned().collect()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        lock(&self.state).records.keys().cloned().collect()
    }

    /// Sizes of the successful upsert batches, in call order.
    #[must_use]
    pub fn put_batch_sizes(&self) -> Vec<usize> {
        lock(&self.state).put_batches.clone()
    }

    /// Sizes of the successful delete batches, in call order.
    #[must_use]
    pub fn delete_batch_sizes(&self) -> Vec<usize> {
        lock(&self.state).delete_batches.clone()
    }

    /// Fails the `n`th upsert batch (zero-based) counted from now.
    pub fn fail_put_batch_at(&self, n: usize) {
        let mut state = lock(&self.state);
        state.fail_put_at = Some(state.put_batches.len() + n);
    }

    /// Fails the `n`th delete batch (zero-based) counted from now.
    pub fn fail_delete_batch_at(&self, n: usize) {
        let mut state = lock(&self.state);
        state.fail_delete_at = Some(state.delete_batches.len() + n);
    }

    /// Makes every scan, query, and ping fail.
    pub fn fail_reads(&self) {
        lock(&self.state).fail_reads = true;
    }

    fn check_reads(state: &MemoryState) -> Result<(), StoreError> {
        if state.fail_reads {
            return Err(StoreError::Other("store unavailable".to_string()));
        }
        Ok(())
    }

    fn check_batch(size: usize) -> Result<(), StoreError> {
        if size > MAX_BATCH_SIZE {
            return Err(StoreError::Other(format!(
                "batch of {size} exceeds the store limit of {MAX_BATCH_SIZE}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ChargerStore for MemoryChargerStore {
    async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        let state = lock(&self.state);
        Self::check_reads(&state)?;
        Ok(state.records.keys().cloned().collect())
    }

    async fn put_batch(&self, chargers: &[ChargerRecord]) -> Result<(), StoreError> {
        Self::check_batch(chargers.len())?;
        let mut state = lock(&self.state);
        if state.fail_put_at == Some(state.put_batches.len()) {
            state.fail_put_at = None;
            return Err(StoreError::Other("put batch rejected".to_string()));
        }
        for record in chargers {
            state
                .records
                .insert(record.charger_id.clone(), record.clone());
        }
        state.put_batches.push(chargers.len());
        Ok(())
    }

    async fn delete_batch(&self, charger_ids: &[String]) -> Result<(), StoreError> {
        Self::check_batch(charger_ids.len())?;
        let mut state = lock(&self.state);
        if state.fail_delete_at == Some(state.delete_batches.len()) {
            state.fail_delete_at = None;
            return Err(StoreError::Other("delete batch rejected".to_string()));
        }
        for id in charger_ids {
            state.records.remove(id);
        }
        state.delete_batches.push(charger_ids.len());
        Ok(())
    }

    async fn query_by_town(&self, town: &str, now: i64) -> Result<Vec<ChargerRecord>, StoreError> {
        let state = lock(&self.state);
        Self::check_reads(&state)?;
        Ok(state
            .records
            .values()
            .filter(|r| r.town == town && !r.is_expired(now))
            .cloned()
            .collect())
    }

    async fn get(&self, charger_id: &str) -> Result<Option<ChargerRecord>, StoreError> {
        let state = lock(&self.state);
        Self::check_reads(&state)?;
        Ok(state.records.get(charger_id).cloned())
    }

    async fn purge_expired(&self, now: i64) -> Result<u64, StoreError> {
        let mut state = lock(&self.state);
        let before = state.records.len();
        state.records.retain(|_, r| !r.is_expired(now));
        Ok(u64::try_from(before - state.records.len()).unwrap_or(u64::MAX))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Self::check_reads(&lock(&self.state))
    }
}

/// A minimal upstream POI object as `OpenChargeMap` returns it.
#[must_use]
pub fn ocm_json(id: i64, town: &str, postcode: &str) -> Value {
    serde_json::json!({
        "ID": id,
        "UUID": format!("uuid-{id}"),
        "AddressInfo": {
            "Title": format!("Charger {id}"),
            "AddressLine1": "Main St 1",
            "Town": town,
            "Postcode": postcode,
            "Latitude": 44.8,
            "Longitude": 20.46
        },
        "NumberOfPoints": 2,
        "UsageType": { "ID": 1, "Title": "Public" },
        "StatusType": { "ID": 50, "Title": "Operational" },
        "DateLastStatusUpdate": "2024-05-01T10:00:00Z"
    })
}

/// A stored record with only the required fields set.
#[must_use]
pub fn charger(id: &str, town: &str, ttl: i64) -> ChargerRecord {
    ChargerRecord {
        charger_id: id.to_string(),
        uuid: None,
        town: town.to_string(),
        town_raw: town.to_string(),
        title: None,
        address_line1: None,
        postcode: None,
        latitude: None,
        longitude: None,
        number_of_points: None,
        usage_type: None,
        status_type: None,
        date_last_status_update: None,
        ttl,
    }
}
