//! HTTP client for the `OpenChargeMap` POI endpoint.
//!
//! Wraps `reqwest` with the query parameters the importer always sends, a
//! descriptive `User-Agent` (the API rejects anonymous default agents), and
//! typed errors for transport failures and non-2xx responses. There is no
//! retry: a failed fetch is surfaced to the caller, and the next scheduled
//! sync tries again.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Url};

use crate::error::OcmError;

pub const DEFAULT_BASE_URL: &str = "https://api.openchargemap.io/v3/poi/";

/// Connection settings for [`OcmClient`].
#[derive(Debug, Clone)]
pub struct OcmClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub country_code: String,
    pub max_results: u32,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl OcmClientConfig {
    #[must_use]
    pub fn from_app_config(config: &chargedb_core::AppConfig) -> Self {
        Self {
            api_key: config.ocm_api_key.clone(),
            base_url: config.ocm_base_url.clone(),
            country_code: config.ocm_country_code.clone(),
            max_results: config.ocm_max_results,
            user_agent: config.ocm_user_agent.clone(),
            timeout_secs: config.ocm_timeout_secs,
        }
    }
}

/// Client for the `OpenChargeMap` POI API.
pub struct OcmClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    country_code: String,
    max_results: u32,
}

impl OcmClient {
    /// Builds a client from the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`OcmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`OcmError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(config: &OcmClientConfig) -> Result<Self, OcmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        // Keep exactly one trailing slash so the query attaches to the
        // resource path rather than replacing its last segment.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| OcmError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url,
            country_code: config.country_code.clone(),
            max_results: config.max_results,
        })
    }

    /// Fetches every charger for the configured country, up to `max_results`.
    ///
    /// Each array element is returned as raw JSON so that one malformed
    /// record can be reported on its own by the mapper instead of failing
    /// the decode of the whole response.
    ///
    /// # Errors
    ///
    /// - [`OcmError::Http`] on network failure.
    /// - [`OcmError::UnexpectedStatus`] on a non-2xx response.
    /// - [`OcmError::Deserialize`] if the body is not a JSON array.
    pub async fn fetch_chargers(&self) -> Result<Vec<serde_json::Value>, OcmError> {
        let url = self.build_url();
        tracing::debug!(
            endpoint = %self.base_url,
            country = %self.country_code,
            max_results = self.max_results,
            "fetching chargers from OpenChargeMap"
        );

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcmError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.base_url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| OcmError::Deserialize {
            context: self.base_url.to_string(),
            source: e,
        })
    }

    /// Builds the request URL with percent-encoded query parameters.
    ///
    /// `key` is only sent when an API key is configured.
    fn build_url(&self) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
            pairs.append_pair("countrycode", &self.country_code);
            pairs.append_pair("maxresults", &self.max_results.to_string());
            pairs.append_pair("compact", "true");
            pairs.append_pair("verbose", "false");
        }
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
