//! Room Service
//!
//! Main entry point for the room service. Loads configuration, connects the
//! configured store, wires the rule engine and its collaborators, and runs
//! until a shutdown signal arrives.

use anyhow::Context;
use room_service::clients::{HttpReservationLedger, HttpUserDirectory};
use room_service::config::{AppConfig, StorageBackend};
use room_service::database::{create_pool, run_migrations};
use room_service::AppState;
use std::sync::Arc;
use tracing::{error, info, warn};

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("room_service={},sqlx=warn", config.log_level).into()
    });

    if config.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Configuration error")?;

    init_tracing(&config);

    info!("Room service starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("Storage backend: {}", config.storage.as_str());

    // =========================================================================
    // COLLABORATORS
    // =========================================================================
    let timeout = config.services.upstream_timeout();
    let users = Arc::new(
        HttpUserDirectory::new(config.services.user_service_url.clone(), timeout)
            .context("Failed to build user service client")?,
    );
    let reservations = Arc::new(
        HttpReservationLedger::new(config.services.reservation_service_url.clone(), timeout)
            .context("Failed to build reservation service client")?,
    );
    info!("User service: {}", config.services.user_service_url);
    info!("Reservation service: {}", config.services.reservation_service_url);

    // =========================================================================
    // STORAGE
    // =========================================================================
    let state = match (config.storage, config.database.as_ref()) {
        (StorageBackend::Postgres, Some(db_config)) => {
            info!("Connecting to database...");
            let pool = create_pool(db_config).await.map_err(|e| {
                error!("Failed to create database pool: {}", e);
                e
            })?;
            info!("Database pool ready (max connections: {})", db_config.max_connections);

            info!("Running database migrations...");
            run_migrations(&pool, None).await.map_err(|e| {
                error!("Database migration failed: {}", e);
                e
            })?;
            info!("Database migrations completed");

            AppState::with_postgres(pool, users, reservations)
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("STORAGE_BACKEND=postgres requires DATABASE_URL");
        }
        (StorageBackend::Memory, _) => {
            warn!("Using in-memory storage, data is lost on shutdown");
            AppState::in_memory(users, reservations)
        }
    };

    // =========================================================================
    // READY
    // =========================================================================
    if let Some(database) = &state.database {
        database.ping().await.context("Database readiness check failed")?;
    }
    info!("Room service ready");
    info!("Press Ctrl+C to shutdown gracefully");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Shutdown signal received, shutting down gracefully...");
    if let Some(database) = state.database {
        database.pool().close().await;
    }
    info!("Room service shutdown complete");
    Ok(())
}
