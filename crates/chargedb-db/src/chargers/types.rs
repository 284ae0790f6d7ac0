//! Row types for the chargers table.

use chargedb_core::ChargerRecord;

/// Column list shared by every read query, in [`ChargerRow`] field order.
pub(super) const CHARGER_COLUMNS: &str = "charger_id, uuid, town, town_raw, title, \
     address_line1, postcode, latitude, longitude, number_of_points, \
     usage_type, status_type, date_last_status_update, ttl";

/// A row from the chargers table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChargerRow {
    pub charger_id: String,
    pub uuid: Option<String>,
    pub town: String,
    pub town_raw: String,
    pub title: Option<String>,
    pub address_line1: Option<String>,
    pub postcode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub number_of_points: Option<i32>,
    pub usage_type: Option<String>,
    pub status_type: Option<String>,
    pub date_last_status_update: Option<String>,
    pub ttl: i64,
}

impl From<ChargerRow> for ChargerRecord {
    fn from(row: ChargerRow) -> Self {
        Self {
            charger_id: row.charger_id,
            uuid: row.uuid,
            town: row.town,
            town_raw: row.town_raw,
            title: row.title,
            address_line1: row.address_line1,
            postcode: row.postcode,
            latitude: row.latitude,
            longitude: row.longitude,
            number_of_points: row.number_of_points,
            usage_type: row.usage_type,
            status_type: row.status_type,
            date_last_status_update: row.date_last_status_update,
            ttl: row.ttl,
        }
    }
}
