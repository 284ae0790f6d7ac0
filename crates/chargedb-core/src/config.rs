use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Upper bound on store batch size; matches the store's batch-write limit.
pub const MAX_BATCH_SIZE: usize = 25;

const DEFAULT_ALLOWED_ORIGIN: &str =
    "http://punjaci-website.s3-website.localhost.localstack.cloud:4566";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("CHARGEDB_ENV", "development"))?;
    let bind_addr: SocketAddr = parse_as(
        "CHARGEDB_BIND_ADDR",
        &or_default("CHARGEDB_BIND_ADDR", "0.0.0.0:3000"),
    )?;
    let log_level = or_default("CHARGEDB_LOG_LEVEL", "info");

    let chargers_table = or_default("CHARGERS_TABLE", "chargers");
    let allowed_origin = or_default("CHARGEDB_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN);

    let ocm_api_key = lookup("OCM_API_KEY").ok().filter(|k| !k.trim().is_empty());
    let ocm_base_url = or_default(
        "CHARGEDB_OCM_BASE_URL",
        "https://api.openchargemap.io/v3/poi/",
    );
    let ocm_country_code = or_default("CHARGEDB_OCM_COUNTRY_CODE", "RS");
    let ocm_max_results: u32 = parse_as(
        "CHARGEDB_OCM_MAX_RESULTS",
        &or_default("CHARGEDB_OCM_MAX_RESULTS", "1000"),
    )?;
    let ocm_user_agent = or_default("CHARGEDB_OCM_USER_AGENT", "EV-Chargers-App/1.0");
    let ocm_timeout_secs: u64 = parse_as(
        "CHARGEDB_OCM_TIMEOUT_SECS",
        &or_default("CHARGEDB_OCM_TIMEOUT_SECS", "30"),
    )?;

    let ttl_secs: i64 = parse_as("CHARGEDB_TTL_SECS", &or_default("CHARGEDB_TTL_SECS", "172800"))?;
    if ttl_secs <= 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CHARGEDB_TTL_SECS".to_string(),
            reason: format!("must be positive, got {ttl_secs}"),
        });
    }

    let batch_size: usize =
        parse_as("CHARGEDB_BATCH_SIZE", &or_default("CHARGEDB_BATCH_SIZE", "25"))?;
    if batch_size == 0 || batch_size > MAX_BATCH_SIZE {
        return Err(ConfigError::InvalidEnvVar {
            var: "CHARGEDB_BATCH_SIZE".to_string(),
            reason: format!("must be between 1 and {MAX_BATCH_SIZE}, got {batch_size}"),
        });
    }

    let db_max_connections: u32 = parse_as(
        "CHARGEDB_DB_MAX_CONNECTIONS",
        &or_default("CHARGEDB_DB_MAX_CONNECTIONS", "10"),
    )?;
    let db_min_connections: u32 = parse_as(
        "CHARGEDB_DB_MIN_CONNECTIONS",
        &or_default("CHARGEDB_DB_MIN_CONNECTIONS", "1"),
    )?;
    let db_acquire_timeout_secs: u64 = parse_as(
        "CHARGEDB_DB_ACQUIRE_TIMEOUT_SECS",
        &or_default("CHARGEDB_DB_ACQUIRE_TIMEOUT_SECS", "10"),
    )?;

    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "CHARGEDB_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        chargers_table,
        allowed_origin,
        ocm_api_key,
        ocm_base_url,
        ocm_country_code,
        ocm_max_results,
        ocm_user_agent,
        ocm_timeout_secs,
        ttl_secs,
        batch_size,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CHARGEDB_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
