//! Simple Maintenance Server
//!
//! Serves a site that can be switched into maintenance mode from an admin
//! settings screen.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      SIMPLE MAINTENANCE                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  request ──► resolve_visitor ─┬─► maintenance_gate ──► site  │
//! │                               │      (503 notice)            │
//! │                               ├─► require_settings_access    │
//! │                               │   ──► indicator ──► admin    │
//! │                               └─► login / health             │
//! │                       ▼                                      │
//! │        ┌─────────────────────────────────┐                   │
//! │        │ SettingsStore (PostgreSQL/mem)  │                   │
//! │        └─────────────────────────────────┘                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod chrome;
mod config;
mod db;
mod models;
mod handlers;
mod middleware;
mod sanitize;
mod templates;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::{
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::handlers::settings::SETTINGS_PATH;
use crate::models::{MemorySettingsStore, PgSettingsStore, SettingsStore};
use crate::sanitize::{PostContentSanitizer, Sanitizer};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "simple_maintenance=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    tracing::info!("Simple Maintenance Server starting...");

    let settings: Arc<dyn SettingsStore> = match &config.database_url {
        Some(url) => {
            tracing::info!("Database: {}", url.split('@').last().unwrap_or("***"));

            let pool = db::create_pool(url).await
                .context("Failed to create database pool")?;

            tracing::info!("Running database migrations...");
            db::run_migrations(&pool).await
                .context("Failed to run migrations")?;

            Arc::new(PgSettingsStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, settings are kept in memory only");
            Arc::new(MemorySettingsStore::new())
        }
    };

    if config.admin_password_hash.is_none() {
        tracing::warn!("ADMIN_PASSWORD_HASH not set, nobody can log in");
    }

    // Build application state
    let state = AppState {
        settings,
        sanitizer: Arc::new(PostContentSanitizer::new()),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await
        .context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<dyn SettingsStore>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Public site - every page view passes the maintenance gate first
    let site_routes = Router::new()
        .route("/", get(handlers::site::home))
        .fallback(handlers::site::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::maintenance::maintenance_gate
        ));

    // Admin area - never gated, shows the indicator
    let admin_routes = Router::new()
        .route(
            SETTINGS_PATH,
            get(handlers::settings::show).post(handlers::settings::save),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::maintenance::maintenance_indicator
        ))
        .layer(axum_middleware::from_fn(middleware::auth::require_settings_access));

    // Session and health routes
    let open_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/login", get(handlers::auth::login_form).post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout));

    // Combine all routes
    Router::new()
        .merge(open_routes)
        .merge(admin_routes)
        .merge(site_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(axum_middleware::from_fn_with_state(
                    state.clone(),
                    middleware::auth::resolve_visitor
                )),
        )
        .with_state(state)
}
