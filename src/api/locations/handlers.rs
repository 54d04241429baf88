use crate::api::models::*;
use crate::storage::LocationRecord;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, info, warn};

/// List every bookmarked location, in insertion order.
pub async fn list_locations_handler(State(state): State<AppState>) -> Json<Vec<LocationRecord>> {
    Json(state.store.list().await)
}

pub async fn create_location_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLocationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LocationRecord>), AppError> {
    // A body that is not JSON, or carries a non-numeric lat/lng, never
    // reaches validate; it gets the same answer as a missing field.
    let Json(request) = payload.map_err(|rejection| {
        warn!(%rejection, "Rejecting malformed location body");
        AppError::BadRequest("invalid location data".to_string())
    })?;

    let new = request.validate().map_err(AppError::BadRequest)?;

    info!(label = %new.label, lat = new.lat, lng = new.lng, "Adding location");

    let record = state.store.append(new).await.map_err(|err| {
        error!(%err, "Failed to persist new location");
        AppError::Internal("unable to save location".to_string())
    })?;

    info!(id = record.id, "Location saved");

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn delete_location_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    // A non-integer id cannot match any record, so it is a plain miss.
    let Path(id) = id.map_err(|_| AppError::NotFound("location not found".to_string()))?;

    match state.store.remove(id).await {
        Ok(Some(record)) => {
            info!(id = record.id, label = %record.label, "Location deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(None) => Err(AppError::NotFound("location not found".to_string())),
        Err(err) => {
            error!(%err, id, "Failed to persist deletion");
            Err(AppError::Internal("unable to delete location".to_string()))
        }
    }
}
