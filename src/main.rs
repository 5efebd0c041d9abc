//! CondoHub Server: condominium resident access and booking gateway
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use condohub_api::{AppState, build_router};
use condohub_auth::{LedgerPurger, RevocationLedger, SessionAuthority, TokenCodec};
use condohub_core::config::AppConfig;
use condohub_core::error::AppError;
use condohub_database::Stores;
use condohub_upstream::HttpUpstream;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CONDOHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CondoHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Token codec ──────────────────────────────────────
    let codec = Arc::new(TokenCodec::new(&config.auth)?);

    // ── Step 2: Stores (+ migrations for PostgreSQL) ─────────────
    tracing::info!(provider = ?config.database.provider, "Connecting stores...");
    let stores = Stores::connect(&config.database).await?;
    let store_timeout = Duration::from_millis(config.database.statement_timeout_ms);

    // ── Step 3: Session authority ────────────────────────────────
    let ledger = RevocationLedger::new(Arc::clone(&stores.revocations), store_timeout);
    let authority = SessionAuthority::new(
        &config.auth,
        codec,
        ledger.clone(),
        Arc::clone(&stores.identities),
        store_timeout,
    )?;

    // ── Step 4: Upstream client ──────────────────────────────────
    let upstream = HttpUpstream::new(&config.upstream)?;
    tracing::info!(base_url = %config.upstream.base_url, "Upstream client ready");

    // ── Step 5: Revocation purge task ────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let purge_interval = Duration::from_secs(config.revocation.purge_interval_seconds);
    let purge_handle = LedgerPurger::new(ledger, purge_interval).spawn(shutdown_rx);
    if purge_handle.is_none() {
        tracing::info!("Revocation purge disabled");
    }

    // ── Step 6: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::new(Arc::new(config), Arc::new(authority), Arc::new(upstream));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("CondoHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    let served = server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)));

    // ── Step 7: Wait for background tasks ────────────────────────
    if let Some(handle) = purge_handle {
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Revocation purge task did not stop in time");
        }
    }
    stores.close().await;

    served?;
    tracing::info!("CondoHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
