pub mod app_config;
pub mod chargers;
pub mod config;
pub mod town;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use chargers::{ChargerRecord, UNKNOWN_TOWN};
pub use config::{load_app_config, load_app_config_from_env, MAX_BATCH_SIZE};
pub use town::{normalize_town, CAPITAL_TOWN};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
