//! Storefront Catalog - library for app logic and testing

pub mod catalog;
pub mod config;
pub mod contact;
pub mod db;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::db::{messages::PgMessageStore, DbConfig};
use crate::state::AppState;

/// Contact messages are small; anything bigger is refused before parsing.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Configure CORS from `CORS_ORIGINS`.
/// `*` allows any origin; methods and headers are always unrestricted.
pub fn configure_cors(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
}

/// Create and configure the application router.
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/api", get(routes::catalog::api_root))
        .route("/api/", get(routes::catalog::api_root))
        .route("/api/categories", get(routes::catalog::list_categories))
        .route("/api/categories/{slug}", get(routes::catalog::get_category))
        .route("/api/products", get(routes::catalog::list_products))
        .route("/api/products/{id}", get(routes::catalog::get_product))
        .route("/api/contact", post(routes::contact::create_contact_message))
        .route("/health", get(routes::health::health_ping))
        .route("/health/database", get(routes::health::health_database))
        .route("/health/ready", get(routes::health::health_ready))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(configure_cors(config))
        .with_state(state)
}

/// Open the message store, or return `None` when no database is configured,
/// it cannot be reached or its schema cannot be created. Contact submissions answer 503 in that case.
async fn connect_message_store() -> Option<PgMessageStore> {
    let Some(db_config) = DbConfig::from_env() else {
        tracing::info!("DATABASE_URL not set. Contact submissions are disabled.");
        return None;
    };

    let pool = match db::init_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(
                "Failed to initialize database pool: {}. Continuing without message store.",
                e
            );
            return None;
        }
    };

    let migrations = db::run_migrations(&pool).await;
    store_after_migrations(pool, migrations).await
}

/// Only a migrated pool can take writes. Otherwise the pool is closed and
/// contact submissions answer 503 instead of failing every insert.
async fn store_after_migrations(
    pool: sqlx::PgPool,
    migrations: Result<(), sqlx::Error>,
) -> Option<PgMessageStore> {
    match migrations {
        Ok(()) => Some(PgMessageStore::new(pool)),
        Err(e) => {
            tracing::error!(
                "Failed to run database migrations: {}. Continuing without message store.",
                e
            );
            pool.close().await;
            None
        }
    }
}

/// Run the server (used by main).
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    let _log_guards = logging::init(&logging::LogConfig::from_env());

    routes::health::init_start_time();

    let config = AppConfig::from_env()?;
    let catalog = catalog::seed::load(config.seed_path.as_deref())?;
    tracing::info!(
        categories = catalog.categories().len(),
        products = catalog.product_count(),
        "Catalog loaded"
    );

    let store = connect_message_store().await;
    let state = AppState::new(
        catalog,
        store
            .clone()
            .map(|s| Arc::new(s) as Arc<dyn db::messages::MessageStore>),
    );

    let app = create_app(state, &config);
    tracing::info!(
        origins = ?config.cors_origins,
        "CORS configured"
    );

    let addr = config.socket_addr()?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = store {
        store.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
