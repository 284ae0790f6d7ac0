//! Read operations for the chargers table.

use chargedb_core::ChargerRecord;
use sqlx::PgPool;

use super::types::{ChargerRow, CHARGER_COLUMNS};
use crate::{ChargerTable, DbError};

/// Returns every stored `charger_id`, reading only the key column.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_charger_ids(pool: &PgPool, table: &ChargerTable) -> Result<Vec<String>, DbError> {
    let sql = format!("SELECT charger_id FROM {}", table.quoted());
    let ids = sqlx::query_scalar::<_, String>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Lists the chargers whose canonical `town` equals `town` exactly.
///
/// Rows whose `ttl` is at or before `now` are treated as already expired
/// and left out. Results are ordered by `charger_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_chargers_by_town(
    pool: &PgPool,
    table: &ChargerTable,
    town: &str,
    now: i64,
) -> Result<Vec<ChargerRecord>, DbError> {
    let sql = format!(
        "SELECT {CHARGER_COLUMNS} FROM {t} \
         WHERE town = $1 AND ttl > $2 \
         ORDER BY charger_id",
        t = table.quoted()
    );
    let rows = sqlx::query_as::<_, ChargerRow>(&sql)
        .bind(town)
        .bind(now)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(ChargerRecord::from).collect())
}

/// Point read by primary key. Returns `None` if no such charger is stored.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_charger(
    pool: &PgPool,
    table: &ChargerTable,
    charger_id: &str,
) -> Result<Option<ChargerRecord>, DbError> {
    let sql = format!(
        "SELECT {CHARGER_COLUMNS} FROM {t} WHERE charger_id = $1",
        t = table.quoted()
    );
    let row = sqlx::query_as::<_, ChargerRow>(&sql)
        .bind(charger_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(ChargerRecord::from))
}
