// ============================================================================
// Launchpad Server - Entry Point
// File: launchpad-app/launchpad-server/src/main.rs
// ============================================================================

use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};

use launchpad_api::{build_router, AppState};
use launchpad_shared::config::AppConfig;
use launchpad_shared::telemetry::{init_telemetry, LogFormat};

/// Periodically sweep expired records and stale login throttling state
fn spawn_purge_task(state: AppState, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match state.auth.purge_expired_sessions().await {
                Ok(0) => {}
                Ok(n) => info!("Purged {} expired sessions", n),
                Err(e) => error!("Session purge failed: {}", e),
            }
            match state.applications.purge_expired_pending().await {
                Ok(0) => {}
                Ok(n) => info!("Purged {} expired parked applications", n),
                Err(e) => error!("Parked application purge failed: {}", e),
            }
            match state.auth.purge_login_limiter() {
                0 => {}
                n => info!("Dropped throttling state for {} emails", n),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    init_telemetry(LogFormat::from_str(&config.app.log_format));
    info!("{} starting in {} mode...", config.app.name, config.app.env);

    if config.auth.uses_dev_secret() {
        warn!("Using the development JWT secret; set LAUNCHPAD__AUTH__JWT_SECRET");
    }

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    let purge_every = Duration::from_secs(config.app.purge_interval.max(1) as u64);

    // Create App State
    let state = AppState::from_config(config);
    state.seed_admins().await?;
    spawn_purge_task(state.clone(), purge_every);

    // Build router
    let app = build_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
