//! Write operations for the chargers table.

use chargedb_core::{ChargerRecord, MAX_BATCH_SIZE};
use sqlx::PgPool;

use crate::{ChargerTable, DbError};

/// Upserts one batch of chargers, overwriting every column of existing rows.
///
/// Uses a single `INSERT … SELECT * FROM UNNEST(…) ON CONFLICT` so the batch
/// is one round-trip. `charger_id`s within a batch must be unique; Postgres
/// refuses to update the same row twice in one statement.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns [`DbError::BatchTooLarge`] if `chargers` exceeds
/// [`MAX_BATCH_SIZE`], or [`DbError::Sqlx`] if the statement fails.
pub async fn upsert_chargers(
    pool: &PgPool,
    table: &ChargerTable,
    chargers: &[ChargerRecord],
) -> Result<u64, DbError> {
    if chargers.is_empty() {
        return Ok(0);
    }
    check_batch_size(chargers.len())?;

    // Collect each column into a parallel Vec for UNNEST binding.
    let mut charger_ids: Vec<String> = Vec::with_capacity(chargers.len());
    let mut uuids: Vec<Option<String>> = Vec::with_capacity(chargers.len());
    let mut towns: Vec<String> = Vec::with_capacity(chargers.len());
    let mut towns_raw: Vec<String> = Vec::with_capacity(chargers.len());
    let mut titles: Vec<Option<String>> = Vec::with_capacity(chargers.len());
    let mut address_line1s: Vec<Option<String>> = Vec::with_capacity(chargers.len());
    let mut postcodes: Vec<Option<String>> = Vec::with_capacity(chargers.len());
    let mut latitudes: Vec<Option<f64>> = Vec::with_capacity(chargers.len());
    let mut longitudes: Vec<Option<f64>> = Vec::with_capacity(chargers.len());
    let mut points: Vec<Option<i32>> = Vec::with_capacity(chargers.len());
    let mut usage_types: Vec<Option<String>> = Vec::with_capacity(chargers.len());
    let mut status_types: Vec<Option<String>> = Vec::with_capacity(chargers.len());
    let mut status_updates: Vec<Option<String>> = Vec::with_capacity(chargers.len());
    let mut ttls: Vec<i64> = Vec::with_capacity(chargers.len());

    for c in chargers {
        charger_ids.push(c.charger_id.clone());
        uuids.push(c.uuid.clone());
        towns.push(c.town.clone());
        towns_raw.push(c.town_raw.clone());
        titles.push(c.title.clone());
        address_line1s.push(c.address_line1.clone());
        postcodes.push(c.postcode.clone());
        latitudes.push(c.latitude);
        longitudes.push(c.longitude);
        points.push(c.number_of_points);
        usage_types.push(c.usage_type.clone());
        status_types.push(c.status_type.clone());
        status_updates.push(c.date_last_status_update.clone());
        ttls.push(c.ttl);
    }

    let sql = format!(
        "INSERT INTO {t} \
             (charger_id, uuid, town, town_raw, title, address_line1, postcode, \
              latitude, longitude, number_of_points, usage_type, status_type, \
              date_last_status_update, ttl) \
         SELECT * FROM UNNEST(\
              $1::text[], $2::text[], $3::text[], $4::text[], $5::text[], $6::text[], $7::text[], \
              $8::float8[], $9::float8[], $10::int4[], $11::text[], $12::text[], \
              $13::text[], $14::int8[]) \
         ON CONFLICT (charger_id) DO UPDATE SET \
             uuid                    = EXCLUDED.uuid, \
             town                    = EXCLUDED.town, \
             town_raw                = EXCLUDED.town_raw, \
             title                   = EXCLUDED.title, \
             address_line1           = EXCLUDED.address_line1, \
             postcode                = EXCLUDED.postcode, \
             latitude                = EXCLUDED.latitude, \
             longitude               = EXCLUDED.longitude, \
             number_of_points        = EXCLUDED.number_of_points, \
             usage_type              = EXCLUDED.usage_type, \
             status_type             = EXCLUDED.status_type, \
             date_last_status_update = EXCLUDED.date_last_status_update, \
             ttl                     = EXCLUDED.ttl, \
             updated_at              = NOW()",
        t = table.quoted()
    );

    let rows_affected = sqlx::query(&sql)
        .bind(&charger_ids)
        .bind(&uuids)
        .bind(&towns)
        .bind(&towns_raw)
        .bind(&titles)
        .bind(&address_line1s)
        .bind(&postcodes)
        .bind(&latitudes)
        .bind(&longitudes)
        .bind(&points)
        .bind(&usage_types)
        .bind(&status_types)
        .bind(&status_updates)
        .bind(&ttls)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(rows_affected)
}

/// Deletes one batch of chargers by primary key.
///
/// Ids that are not stored are ignored. Returns the number of rows removed.
///
/// # Errors
///
/// Returns [`DbError::BatchTooLarge`] if `charger_ids` exceeds
/// [`MAX_BATCH_SIZE`], or [`DbError::Sqlx`] if the statement fails.
pub async fn delete_chargers(
    pool: &PgPool,
    table: &ChargerTable,
    charger_ids: &[String],
) -> Result<u64, DbError> {
    if charger_ids.is_empty() {
        return Ok(0);
    }
    check_batch_size(charger_ids.len())?;

    let sql = format!(
        "DELETE FROM {} WHERE charger_id = ANY($1::text[])",
        table.quoted()
    );
    let rows_affected = sqlx::query(&sql)
        .bind(charger_ids)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows_affected)
}

/// Deletes every row whose `ttl` is at or before `now`.
///
/// Postgres has no native row expiry, so this stands in for it when
/// reconciliation has stopped refreshing rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn purge_expired_chargers(
    pool: &PgPool,
    table: &ChargerTable,
    now: i64,
) -> Result<u64, DbError> {
    let sql = format!("DELETE FROM {} WHERE ttl <= $1", table.quoted());
    let rows_affected = sqlx::query(&sql)
        .bind(now)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows_affected)
}

fn check_batch_size(size: usize) -> Result<(), DbError> {
    if size > MAX_BATCH_SIZE {
        return Err(DbError::BatchTooLarge {
            size,
            max: MAX_BATCH_SIZE,
        });
    }
    Ok(())
}
