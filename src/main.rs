mod api;
mod config;
mod storage;

use crate::api::{AppState, health_handler};
use crate::config::AppConfig;
use crate::storage::LocationStore;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Location Bookmark API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Server: {}:{}", config.server.host, config.server.port);
    info!("   - Locations file: {:?}", config.storage.locations_path);
    info!("   - Static dir: {:?}", config.server.static_dir);

    // Initialize location store
    info!("💾 Initializing location store...");
    let store = Arc::new(LocationStore::load(&config.storage.locations_path));
    let location_count = store.count().await;
    info!("✅ Location store ready ({} locations)", location_count);

    // Create application state
    let state = AppState { store };

    // Build router with modular routes; unrouted paths fall through to
    // the static directory (index.html at the root).
    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(api::locations::routes())
        .with_state(state)
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET    /health              - Health check");
    info!("   GET    /api/locations       - List saved locations");
    info!("   POST   /api/locations       - Save a new location");
    info!("   DELETE /api/locations/:id   - Delete a location");
    info!("   GET    /                    - Web UI");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
