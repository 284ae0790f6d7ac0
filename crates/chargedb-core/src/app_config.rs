use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub chargers_table: String,
    pub allowed_origin: String,
    pub ocm_api_key: Option<String>,
    pub ocm_base_url: String,
    pub ocm_country_code: String,
    pub ocm_max_results: u32,
    pub ocm_user_agent: String,
    pub ocm_timeout_secs: u64,
    pub ttl_secs: i64,
    pub batch_size: usize,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("chargers_table", &self.chargers_table)
            .field("allowed_origin", &self.allowed_origin)
            .field(
                "ocm_api_key",
                &self.ocm_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("ocm_base_url", &self.ocm_base_url)
            .field("ocm_country_code", &self.ocm_country_code)
            .field("ocm_max_results", &self.ocm_max_results)
            .field("ocm_user_agent", &self.ocm_user_agent)
            .field("ocm_timeout_secs", &self.ocm_timeout_secs)
            .field("ttl_secs", &self.ttl_secs)
            .field("batch_size", &self.batch_size)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
