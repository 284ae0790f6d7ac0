//! Town lookup behind `GET /chargers/{town}`.

use std::borrow::Cow;

use chargedb_core::ChargerRecord;
use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::error::QueryError;
use crate::ports::ChargerStore;

/// Response body of a successful town lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TownChargers {
    pub town: String,
    pub count: usize,
    pub chargers: Vec<ChargerRecord>,
}

/// Percent-decodes a raw path segment into a town label, trimming
/// surrounding whitespace. A literal `+` is kept as-is.
///
/// # Errors
///
/// Returns [`QueryError::BadRequest`] if the segment is missing, blank after
/// decoding, or does not decode to UTF-8.
pub fn decode_town(raw: Option<&str>) -> Result<String, QueryError> {
    let raw = raw.ok_or_else(|| QueryError::BadRequest("town is required".to_string()))?;
    let decoded: Cow<'_, str> = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| QueryError::BadRequest("town is not valid UTF-8 once decoded".to_string()))?;
    let town = decoded.trim();
    if town.is_empty() {
        return Err(QueryError::BadRequest("town is required".to_string()));
    }
    Ok(town.to_owned())
}

/// Looks up the chargers whose canonical town equals the decoded `raw_town`.
///
/// Matching is exact and case-sensitive. Records whose TTL has passed at
/// `now` are left out even if the store has not removed them yet. An unknown
/// town is not an error; it yields an empty list.
///
/// # Errors
///
/// - [`QueryError::BadRequest`] from [`decode_town`].
/// - [`QueryError::Internal`] if the store query fails.
pub async fn get_chargers_by_town(
    store: &dyn ChargerStore,
    raw_town: Option<&str>,
    now: i64,
) -> Result<TownChargers, QueryError> {
    let town = decode_town(raw_town)?;
    let chargers = store
        .query_by_town(&town, now)
        .await
        .map_err(QueryError::Internal)?;
    tracing::debug!(town = %town, count = chargers.len(), "town lookup");
    Ok(TownChargers {
        count: chargers.len(),
        town,
        chargers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{charger, MemoryChargerStore};

    const NOW: i64 = 1_700_000_000;

    fn store() -> MemoryChargerStore {
        MemoryChargerStore::with_records([
            charger("1", "Belgrade", NOW + 100),
            charger("2", "Belgrade", NOW + 100),
            charger("3", "Novi Sad", NOW + 100),
            charger("4", "Niš", NOW + 100),
            charger("5", "Belgrade", NOW - 1),
        ])
    }

    #[tokio::test]
    async fn returns_matching_chargers_with_count() {
        let store = store();
        let result = get_chargers_by_town(&store, Some("Belgrade"), NOW)
            .await
            .expect("query");

        assert_eq!(result.town, "Belgrade");
        assert_eq!(result.count, 2);
        let ids: Vec<&str> = result.chargers.iter().map(|c| c.charger_id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[tokio::test]
    async fn decodes_percent_encoded_town() {
        let store = store();
        let spaced = get_chargers_by_town(&store, Some("Novi%20Sad"), NOW)
            .await
            .expect("query");
        assert_eq!(spaced.town, "Novi Sad");
        assert_eq!(spaced.count, 1);

        let accented = get_chargers_by_town(&store, Some("Ni%C5%A1"), NOW)
            .await
            .expect("query");
        assert_eq!(accented.town, "Niš");
        assert_eq!(accented.count, 1);
    }

    #[tokio::test]
    async fn unknown_town_is_an_empty_result() {
        let store = store();
        let result = get_chargers_by_town(&store, Some("Atlantis"), NOW)
            .await
            .expect("query");
        assert_eq!(result.count, 0);
        assert!(result.chargers.is_empty());
    }

    #[tokio::test]
    async fn matching_is_case_sensitive() {
        let store = store();
        let result = get_chargers_by_town(&store, Some("belgrade"), NOW)
            .await
            .expect("query");
        assert_eq!(result.count, 0);
    }

    #[tokio::test]
    async fn expired_records_are_hidden() {
        let store = store();
        let later = get_chargers_by_town(&store, Some("Belgrade"), NOW + 100)
            .await
            .expect("query");
        assert_eq!(later.count, 0);
    }

    #[tokio::test]
    async fn missing_or_blank_town_is_bad_request() {
        let store = store();
        for raw in [None, Some(""), Some("%20%20"), Some("   ")] {
            let err = get_chargers_by_town(&store, raw, NOW)
                .await
                .expect_err("should reject");
            assert!(matches!(err, QueryError::BadRequest(_)), "{raw:?}: {err}");
        }
    }

    #[test]
    fn invalid_utf8_is_bad_request() {
        let err = decode_town(Some("%FF%FE")).expect_err("should reject");
        assert!(matches!(err, QueryError::BadRequest(_)));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(decode_town(Some("%20Belgrade%20")).expect("decode"), "Belgrade");
    }

    #[test]
    fn plus_is_not_a_space() {
        assert_eq!(decode_town(Some("Novi+Sad")).expect("decode"), "Novi+Sad");
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let store = store();
        store.fail_reads();
        let err = get_chargers_by_town(&store, Some("Belgrade"), NOW)
            .await
            .expect_err("should fail");
        assert!(matches!(err, QueryError::Internal(_)));
    }
}
