//! folio server
//!
//! - Server-rendered pages, full page or `HX-Request` fragment
//! - Contact form submission
//! - `/metrics` (Prometheus text) and `/health`
//! - Background uptime tracking

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use folio_core::error::{Result, SiteError};
use folio_server::{app_state, config, obs::UptimeTracker, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var(config::CONFIG_PATH_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_with_env(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(&cfg)?;
    state
        .metrics()
        .record_app_info(&cfg.app.version, &cfg.app.environment);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let uptime =
        UptimeTracker::new(state.metrics(), cfg.metrics.uptime_interval()).spawn(shutdown_rx);

    let app = router::build_router(state);

    tracing::info!(%listen, environment = %cfg.app.environment, "folio-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| SiteError::Internal(format!("bind {listen} failed: {e}")))?;

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to install CTRL+C handler");
            }
            tracing::info!("shutting down");
        })
        .await;

    let _ = shutdown_tx.send(true);
    if let Err(e) = uptime.await {
        tracing::warn!(error = %e, "uptime tracker join failed");
    }

    served.map_err(|e| SiteError::Internal(format!("server failed: {e}")))
}
