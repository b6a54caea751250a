//! Keygate - API key issuance and authorization service.
//!
//! Issues opaque API keys to named principals, stores only their salted
//! hashes and authorizes requests that present a valid key.

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod domain;
mod error;
mod logging;
mod storage;

use crate::api::build_router;
use crate::auth::{ApiKeyGate, KeyHasher, KeyManager};
use crate::config::{Config, StorageBackend};
use crate::storage::{KeyStore, MemoryKeyStore, SqliteKeyStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// API key lifecycle manager.
    pub manager: KeyManager,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Load configuration before the subscriber exists, so failures go to stderr
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    // Initialize logging
    logging::init(&config.logging);

    tracing::info!("Starting Keygate v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        backend = ?config.database.backend,
        database = %config.database.url,
        admin_enabled = %config.admin.enabled,
        "Configuration loaded"
    );

    if config.keys.uses_default_salt() {
        tracing::warn!("Using the default key salt - set KEYGATE__KEYS__SALT for production");
    }

    let store: Arc<dyn KeyStore> = match config.database.backend {
        StorageBackend::Sqlite => {
            // Connect to database
            let pool = SqlitePoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to connect to database");
                    anyhow::anyhow!("Database connection error: {}", e)
                })?;

            // Initialize store and schema
            let store = SqliteKeyStore::new(pool);
            store.init_schema().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to initialize database schema");
                anyhow::anyhow!("Schema initialization error: {}", e)
            })?;

            tracing::info!("Database connected and schema initialized");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory key store - issued keys are lost on restart");
            Arc::new(MemoryKeyStore::new())
        }
    };

    let manager = KeyManager::new(store, KeyHasher::new(config.keys.salt.clone()));
    let gate = ApiKeyGate::new(manager.clone());
    let state = AppState { manager };

    // Build router
    let app = build_router(state, gate, config.admin.enabled);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
