//! Count Data Service - Main Application Entry Point
//!
//! This is a REST API server for a single date-indexed counter table. It provides key-protected endpoints to insert, read, update and delete one record per calendar date.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL over verified TLS with sqlx (async queries)
//! - **Authentication**: shared API key in `x-api-key` header or `api_key` query parameter
//! - **Format**: JSON requests/responses, dates as `DD/MM/YYYY`
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Optionally create the table
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port, until Ctrl-C or SIGTERM

mod config;
mod db;
mod error;
mod extract;
mod handlers;
mod middleware;
mod models;
mod services;

use std::{path::Path, sync::Arc};

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tokio::signal;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    middleware::auth::ApiKey,
    services::count_store::{CountStore, PgCountStore},
};

/// State shared with every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CountStore>,
    pub api_key: ApiKey,
}

/// Build the HTTP router.
///
/// `/create` is public; everything under `/api` requires the API key. Any
/// other path is served from `static_dir`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let authenticated_routes = Router::new()
        .route("/api", get(handlers::health::server_status))
        .route("/api/add", post(handlers::counts::add_record))
        .route("/api/all/data", get(handlers::counts::list_records))
        .route("/api/data", get(handlers::counts::get_record))
        .route("/api/update", put(handlers::counts::update_record))
        .route("/api/delete", delete(handlers::counts::delete_record))
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.api_key.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        // Public routes (no authentication required)
        .route("/create", get(handlers::table::create_table))
        .merge(authenticated_routes)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    let api_key = ApiKey::new(&config.api_key);
    tracing::info!(api_key = %api_key.fingerprint(), "Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url, &config.database_ca_cert).await?;
    tracing::info!(ca_cert = %config.database_ca_cert.display(), "Database pool created");

    let store = PgCountStore::new(pool);
    if config.create_table_on_startup {
        store.create_table().await?;
        tracing::info!("count_data_table ready");
    }

    let state = AppState {
        store: Arc::new(store),
        api_key,
    };
    let app = build_router(state, &config.static_dir);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
