//! Production implementations of the collaborator seams.

use async_trait::async_trait;
use chargedb_core::ChargerRecord;
use chargedb_db::ChargerTable;
use chargedb_ocm::OcmClient;
use sqlx::PgPool;

use crate::error::{SourceError, StoreError};
use crate::ports::{ChargerSource, ChargerStore};

#[async_trait]
impl ChargerSource for OcmClient {
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, SourceError> {
        Ok(self.fetch_chargers().await?)
    }
}

/// [`ChargerStore`] backed by a Postgres table.
#[derive(Debug, Clone)]
pub struct PgChargerStore {
    pool: PgPool,
    table: ChargerTable,
}

impl PgChargerStore {
    #[must_use]
    pub fn new(pool: PgPool, table: ChargerTable) -> Self {
        Self { pool, table }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[must_use]
    pub fn table(&self) -> &ChargerTable {
        &self.table
    }
}

#[async_trait]
impl ChargerStore for PgChargerStore {
    async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(chargedb_db::list_charger_ids(&self.pool, &self.table).await?)
    }

    async fn put_batch(&self, chargers: &[ChargerRecord]) -> Result<(), StoreError> {
        chargedb_db::upsert_chargers(&self.pool, &self.table, chargers).await?;
        Ok(())
    }

    async fn delete_batch(&self, charger_ids: &[String]) -> Result<(), StoreError> {
        chargedb_db::delete_chargers(&self.pool, &self.table, charger_ids).await?;
        Ok(())
    }

    async fn query_by_town(&self, town: &str, now: i64) -> Result<Vec<ChargerRecord>, StoreError> {
        Ok(chargedb_db::list_chargers_by_town(&self.pool, &self.table, town, now).await?)
    }

    async fn get(&self, charger_id: &str) -> Result<Option<ChargerRecord>, StoreError> {
        Ok(chargedb_db::get_charger(&self.pool, &self.table, charger_id).await?)
    }

    async fn purge_expired(&self, now: i64) -> Result<u64, StoreError> {
        Ok(chargedb_db::purge_expired_chargers(&self.pool, &self.table, now).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(chargedb_db::health_check(&self.pool).await?)
    }
}
