use thiserror::Error;

/// Errors returned by the `OpenChargeMap` client and record mapper.
#[derive(Debug, Error)]
pub enum OcmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL does not parse.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A single upstream record is structurally unusable.
    #[error("invalid charger record {record}: {reason}")]
    InvalidRecord { record: String, reason: String },
}
