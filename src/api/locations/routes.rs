use crate::api::locations::handlers::{
    create_location_handler, delete_location_handler, list_locations_handler,
};
use crate::api::models::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/locations",
            get(list_locations_handler).post(create_location_handler),
        )
        .route("/api/locations/{id}", delete(delete_location_handler))
}
