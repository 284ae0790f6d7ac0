//! `OpenChargeMap` POI response types.
//!
//! Only the fields the importer reads are modelled. Every nested object and
//! most scalars are optional because `compact=true` responses drop the
//! expanded reference data and many community-submitted sites are sparse.

use serde::Deserialize;

/// A single point of interest from `GET /v3/poi/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmCharger {
    #[serde(rename = "ID", default)]
    pub id: Option<i64>,
    #[serde(rename = "UUID", default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub address_info: Option<OcmAddressInfo>,
    #[serde(default)]
    pub number_of_points: Option<i32>,
    #[serde(default)]
    pub usage_type: Option<OcmLookup>,
    #[serde(default)]
    pub status_type: Option<OcmLookup>,
    /// ISO-8601 timestamp as sent by the API.
    #[serde(default)]
    pub date_last_status_update: Option<String>,
}

/// Location block embedded in every POI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmAddressInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Reference-data entry such as a usage type or status type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmLookup {
    #[serde(default)]
    pub title: Option<String>,
}
