//! CaseHub sharing server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use casehub_api::{AppState, build_router, build_sharing};
use casehub_core::config::{AppConfig, StoreBackend};
use casehub_core::error::AppError;
use casehub_core::traits::store::RecordStore;
use casehub_database::{DatabasePool, MemoryRecordStore, Repositories};
use casehub_worker::{CronScheduler, InviteSweepJob};

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

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CASEHUB_ENV").unwrap_or_else(|_| "development".to_string());
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
    tracing::info!("Starting CaseHub sharing v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Record store ─────────────────────────────────────
    let (store, db_pool): (Arc<dyn RecordStore>, Option<DatabasePool>) =
        match config.store.backend {
            StoreBackend::Postgres => {
                tracing::info!("Connecting to database...");
                let pool = DatabasePool::connect(&config.database).await?;

                if config.database.run_migrations {
                    casehub_database::migration::run_migrations(pool.pool()).await?;
                }

                (Arc::new(pool.record_store()) as Arc<dyn RecordStore>, Some(pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory store; data is lost on shutdown");
                (Arc::new(MemoryRecordStore::new()) as Arc<dyn RecordStore>, None)
            }
        };

    // ── Step 2: Services ─────────────────────────────────────────
    let repos = Repositories::new(store);
    let sharing = build_sharing(&config, &repos);

    // ── Step 3: Background scheduler ─────────────────────────────
    let scheduler = if config.worker.enabled {
        let scheduler = CronScheduler::new().await?;
        scheduler
            .register_default_tasks(&config.worker, InviteSweepJob::new(sharing.clone()))
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background scheduler disabled");
        None
    };

    // ── Step 4: HTTP server ──────────────────────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let config = Arc::new(config);
    let app = build_router(AppState::new(config, repos.store.clone(), sharing));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("CaseHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 5: Stop background work ─────────────────────────────
    if let Some(mut scheduler) = scheduler {
        match tokio::time::timeout(grace, scheduler.shutdown()).await {
            Ok(Err(e)) => tracing::warn!("Scheduler shutdown failed: {}", e),
            Err(_) => tracing::warn!("Scheduler did not stop within {:?}", grace),
            Ok(Ok(())) => {}
        }
    }
    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("CaseHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
