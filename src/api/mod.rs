pub mod locations;
pub mod models;

// Re-exports
pub use models::*;

// Health handler (simple, keep here)
use axum::{Json, extract::State};

pub async fn health_handler(State(state): State<models::AppState>) -> impl axum::response::IntoResponse {
    let total_locations = state.store.count().await;
    Json(models::HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_locations,
    })
}
