//! Claim lifecycle engine API server
//!
//! Configuration comes from `API_*` environment variables (a local `.env`
//! file is honoured):
//!
//! * `API_HOST` / `API_PORT` - bind address (default 0.0.0.0:8080)
//! * `API_LOCK_DURATION_SECS` - evaluation lock lease (default 3600)
//! * `API_TIER_L1_CEILING` etc. - processor tier amount ceilings
//! * `API_LOG_LEVEL` - trace, debug, info, warn, error (default info)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_store::InMemoryClaimStore;
use interface_api::{config::ApiConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().unwrap_or_default();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("invalid server address")?;

    tracing::info!(
        %addr,
        lock_duration_secs = config.lock_duration_secs,
        "starting claim lifecycle engine"
    );

    let store = Arc::new(InMemoryClaimStore::new());
    let app = create_router(store, config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => tracing::info!("received Ctrl+C, draining"),
        _ = terminate => tracing::info!("received SIGTERM, draining"),
    }
}
