mod api;
mod middleware;

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use chargedb_db::ChargerTable;
use chargedb_ocm::{OcmClient, OcmClientConfig};
use chargedb_sync::{PgChargerStore, SyncSettings};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = chargedb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = chargedb_db::PoolConfig::from_app_config(&config);
    let pool = chargedb_db::connect_pool(&config.database_url, pool_config).await?;
    let table = ChargerTable::new(config.chargers_table.clone())?;
    chargedb_db::provision_table(&pool, &table).await?;

    let source = OcmClient::new(&OcmClientConfig::from_app_config(&config))?;
    let allowed_origin = HeaderValue::from_str(&config.allowed_origin)
        .with_context(|| format!("invalid CHARGEDB_ALLOWED_ORIGIN: {}", config.allowed_origin))?;

    let state = AppState {
        store: Arc::new(PgChargerStore::new(pool, table)),
        source: Arc::new(source),
        settings: SyncSettings::from_app_config(&config),
    };
    let app = build_app(state, allowed_origin);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        table = %config.chargers_table,
        "chargedb-server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
