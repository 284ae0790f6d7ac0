//! Mapping of `OpenChargeMap` records into [`ChargerRecord`]s.

use chargedb_core::{normalize_town, ChargerRecord, UNKNOWN_TOWN};

use crate::error::OcmError;
use crate::types::{OcmAddressInfo, OcmCharger};

/// Parses one raw array element from the POI response.
///
/// `index` is the element's position in the response and only used to
/// identify the record in the error.
///
/// # Errors
///
/// Returns [`OcmError::InvalidRecord`] if the element is not an object of
/// the expected shape (for example a non-numeric `ID`).
pub fn parse_charger(value: serde_json::Value, index: usize) -> Result<OcmCharger, OcmError> {
    let record = record_label(&value, index);
    serde_json::from_value(value).map_err(|e| OcmError::InvalidRecord {
        record,
        reason: e.to_string(),
    })
}

/// Maps an upstream charger into the stored schema.
///
/// Missing nested blocks degrade to defaults: the town becomes
/// [`UNKNOWN_TOWN`] unless the postcode identifies it, and every other
/// descriptive field is omitted. `ttl` is `now + ttl_secs`.
///
/// # Errors
///
/// Returns [`OcmError::InvalidRecord`] if the record has no `ID`, since
/// without it there is no primary key. `index` is the element's position in
/// the response and, with the `UUID` when present, identifies it in the error.
pub fn map_charger(
    raw: OcmCharger,
    index: usize,
    now: i64,
    ttl_secs: i64,
) -> Result<ChargerRecord, OcmError> {
    let Some(id) = raw.id else {
        return Err(OcmError::InvalidRecord {
            record: raw.uuid.as_deref().map_or_else(
                || format!("index {index}"),
                |u| format!("UUID {u} (index {index})"),
            ),
            reason: "missing ID".to_string(),
        });
    };

    let address = raw.address_info.unwrap_or_default();
    let OcmAddressInfo {
        title,
        address_line1,
        town: town_raw,
        postcode,
        latitude,
        longitude,
    } = address;

    let town = normalize_town(town_raw.as_deref(), postcode.as_deref());
    let town_raw = town_raw
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TOWN.to_string());

    Ok(ChargerRecord {
        charger_id: id.to_string(),
        uuid: raw.uuid,
        town,
        town_raw,
        title,
        address_line1,
        postcode,
        latitude,
        longitude,
        number_of_points: raw.number_of_points,
        usage_type: raw.usage_type.and_then(|u| u.title),
        status_type: raw.status_type.and_then(|s| s.title),
        date_last_status_update: raw.date_last_status_update,
        ttl: now.saturating_add(ttl_secs),
    })
}

/// Best-effort identifier for a raw element, used only in error messages.
fn record_label(value: &serde_json::Value, index: usize) -> String {
    match value.get("ID") {
        Some(id) if !id.is_null() => format!("ID {id} (index {index})"),
        _ => format!("index {index}"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const NOW: i64 = 1_700_000_000;
    const TWO_DAYS: i64 = 2 * 24 * 60 * 60;

    fn full_charger() -> serde_json::Value {
        json!({
            "ID": 12345,
            "UUID": "8F1C9E6A-0000-4000-8000-000000000001",
            "NumberOfPoints": 4,
            "DateLastStatusUpdate": "2024-03-01T10:00:00Z",
            "AddressInfo": {
                "Title": "Ušće Shopping Center",
                "AddressLine1": "Bulevar Mihajla Pupina 4",
                "Town": "Beograd",
                "Postcode": "11070",
                "Latitude": 44.8154,
                "Longitude": 20.4367
            },
            "UsageType": { "ID": 1, "Title": "Public" },
            "StatusType": { "ID": 50, "Title": "Operational" }
        })
    }

    fn map(value: serde_json::Value) -> Result<ChargerRecord, OcmError> {
        map_charger(parse_charger(value, 0)?, 0, NOW, TWO_DAYS)
    }

    #[test]
    fn maps_every_field_of_a_complete_record() {
        let record = map(full_charger()).expect("maps");
        assert_eq!(record.charger_id, "12345");
        assert_eq!(
            record.uuid.as_deref(),
            Some("8F1C9E6A-0000-4000-8000-000000000001")
        );
        assert_eq!(record.town, "Belgrade");
        assert_eq!(record.town_raw, "Beograd");
        assert_eq!(record.title.as_deref(), Some("Ušće Shopping Center"));
        assert_eq!(
            record.address_line1.as_deref(),
            Some("Bulevar Mihajla Pupina 4")
        );
        assert_eq!(record.postcode.as_deref(), Some("11070"));
        assert_eq!(record.latitude, Some(44.8154));
        assert_eq!(record.longitude, Some(20.4367));
        assert_eq!(record.number_of_points, Some(4));
        assert_eq!(record.usage_type.as_deref(), Some("Public"));
        assert_eq!(record.status_type.as_deref(), Some("Operational"));
        assert_eq!(
            record.date_last_status_update.as_deref(),
            Some("2024-03-01T10:00:00Z")
        );
    }

    #[test]
    fn ttl_is_now_plus_retention() {
        let record = map(full_charger()).expect("maps");
        assert_eq!(record.ttl, NOW + TWO_DAYS);
    }

    #[test]
    fn record_with_only_an_id_maps_to_defaults() {
        let record = map(json!({ "ID": 7 })).expect("maps");
        assert_eq!(record.charger_id, "7");
        assert_eq!(record.town, UNKNOWN_TOWN);
        assert_eq!(record.town_raw, UNKNOWN_TOWN);
        assert!(record.uuid.is_none());
        assert!(record.title.is_none());
        assert!(record.postcode.is_none());
        assert!(record.latitude.is_none());
        assert!(record.number_of_points.is_none());
        assert!(record.usage_type.is_none());
        assert!(record.status_type.is_none());
    }

    #[test]
    fn null_nested_blocks_map_to_defaults() {
        let record = map(json!({
            "ID": 8,
            "AddressInfo": null,
            "UsageType": null,
            "StatusType": { "ID": 0 }
        }))
        .expect("maps");
        assert_eq!(record.town, UNKNOWN_TOWN);
        assert!(record.usage_type.is_none());
        assert!(record.status_type.is_none());
    }

    #[test]
    fn compact_lookup_ids_without_titles_are_omitted() {
        let record = map(json!({ "ID": 9, "UsageTypeID": 1, "StatusTypeID": 50 })).expect("maps");
        assert!(record.usage_type.is_none());
        assert!(record.status_type.is_none());
    }

    #[test]
    fn empty_town_with_capital_postcode_is_capital_but_raw_is_unknown() {
        let record = map(json!({
            "ID": 10,
            "AddressInfo": { "Town": "", "Postcode": "11000" }
        }))
        .expect("maps");
        assert_eq!(record.town, "Belgrade");
        assert_eq!(record.town_raw, UNKNOWN_TOWN);
    }

    #[test]
    fn other_town_is_kept() {
        let record = map(json!({
            "ID": 11,
            "AddressInfo": { "Town": "Novi Sad", "Postcode": "21000" }
        }))
        .expect("maps");
        assert_eq!(record.town, "Novi Sad");
        assert_eq!(record.town_raw, "Novi Sad");
    }

    #[test]
    fn missing_id_is_a_mapping_error_naming_the_uuid() {
        let err = map(json!({ "UUID": "abc" })).unwrap_err();
        match err {
            OcmError::InvalidRecord { record, reason } => {
                assert_eq!(record, "UUID abc (index 0)");
                assert_eq!(reason, "missing ID");
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn missing_id_and_uuid_is_a_mapping_error_naming_the_index() {
        let raw = parse_charger(json!({}), 4).expect("parses");
        let err = map_charger(raw, 4, NOW, TWO_DAYS).unwrap_err();
        assert!(
            matches!(err, OcmError::InvalidRecord { ref record, .. } if record == "index 4"),
            "got {err:?}"
        );
    }

    #[test]
    fn padded_town_is_stored_trimmed() {
        let record = map(json!({
            "ID": 12,
            "AddressInfo": { "Town": "Novi Sad ", "Postcode": "21000" }
        }))
        .expect("maps");
        assert_eq!(record.town, "Novi Sad");
        assert_eq!(record.town_raw, "Novi Sad ");
    }

    #[test]
    fn non_numeric_id_is_a_mapping_error_naming_the_element() {
        let err = parse_charger(json!({ "ID": "abc" }), 3).unwrap_err();
        match err {
            OcmError::InvalidRecord { record, .. } => {
                assert_eq!(record, "ID \"abc\" (index 3)");
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn non_object_element_is_a_mapping_error() {
        let err = parse_charger(json!("not a charger"), 5).unwrap_err();
        assert!(
            matches!(err, OcmError::InvalidRecord { ref record, .. } if record == "index 5"),
            "got {err:?}"
        );
    }
}
