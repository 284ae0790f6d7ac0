//! The persisted charger schema shared by the importer, the store, and the
//! read API.

use serde::{Deserialize, Serialize};

/// Sentinel town label used when the upstream record carries no usable town.
pub const UNKNOWN_TOWN: &str = "Unknown";

/// One charging site as stored and served.
///
/// Field names serialize in camelCase because the read endpoint returns
/// records verbatim. Optional fields are omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargerRecord {
    /// Primary key: the upstream numeric `ID` rendered as a decimal string.
    pub charger_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Canonical town label. Never empty.
    pub town: String,
    /// Upstream town string before normalization, kept for diagnostics.
    pub town_raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_points: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_last_status_update: Option<String>,
    /// Absolute expiry, in Unix epoch seconds.
    pub ttl: i64,
}

impl ChargerRecord {
    /// Returns `true` once `now` (epoch seconds) has reached the record's TTL.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        self.ttl <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ChargerRecord {
        ChargerRecord {
            charger_id: "1".to_string(),
            uuid: None,
            town: "Belgrade".to_string(),
            town_raw: "Beograd".to_string(),
            title: Some("Ušće".to_string()),
            address_line1: None,
            postcode: Some("11070".to_string()),
            latitude: Some(44.8154),
            longitude: Some(20.4367),
            number_of_points: Some(2),
            usage_type: None,
            status_type: None,
            date_last_status_update: None,
            ttl: 1_000,
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(record()).expect("serialize");
        assert_eq!(json["chargerId"], "1");
        assert_eq!(json["townRaw"], "Beograd");
        assert_eq!(json["numberOfPoints"], 2);
        assert_eq!(json["ttl"], 1_000);
    }

    #[test]
    fn omits_absent_optional_fields() {
        let json = serde_json::to_value(record()).expect("serialize");
        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("uuid"));
        assert!(!obj.contains_key("usageType"));
        assert!(!obj.contains_key("addressLine1"));
    }

    #[test]
    fn expiry_is_inclusive_of_ttl() {
        let r = record();
        assert!(!r.is_expired(999));
        assert!(r.is_expired(1_000));
        assert!(r.is_expired(1_001));
    }
}
