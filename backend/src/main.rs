//! Account API Backend
//!
//! User registration, JWT issuance and refresh, and self-service profile.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: account business logic
//! - Repositories: the `UserStore` seam (PostgreSQL or in-memory)
//! - Database: PostgreSQL with SQLx

use account_api_backend::{
    config::{self, StoreBackend},
    db,
    repositories::{MemoryUserStore, PgUserStore, UserStore},
    routes,
    state::AppState,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        store = ?config.store.backend,
        "Starting Account API Backend"
    );

    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    let store = build_store(&config).await?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(store, config);
    let app = routes::create_router(state);

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Open the configured user store
async fn build_store(config: &config::AppConfig) -> Result<Arc<dyn UserStore>> {
    match config.store.backend {
        StoreBackend::Postgres => {
            info!("Connecting to database...");
            let pool = db::connect(&config.database).await?;

            // Production runs migrations as a separate job
            if !config::AppConfig::is_production() {
                db::migrate(&pool).await?;
            }

            Ok(Arc::new(PgUserStore::new(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory user store; accounts are lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "account_api_backend=info,tower_http=info".into()
        } else {
            "account_api_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Refuse to start production with development settings
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    let problems = config.production_problems();
    if !problems.is_empty() {
        for problem in &problems {
            error!("Configuration error: {}", problem);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
