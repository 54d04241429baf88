use crate::storage::{LocationStore, NewLocation};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LocationStore>,
}

/// Request to bookmark a location.
///
/// Fields are optional at the serde level so a missing field reaches
/// `validate` instead of bouncing off the extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateLocationRequest {
    pub label: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl CreateLocationRequest {
    /// Validate the request
    pub fn validate(self) -> Result<NewLocation, String> {
        let Some(label) = self.label.filter(|l| !l.trim().is_empty()) else {
            return Err("invalid location data".to_string());
        };
        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Err("invalid location data".to_string());
        };
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err("invalid coordinates".to_string());
        }
        Ok(NewLocation { label, lat, lng })
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_locations: usize,
}

/// Error response body: a single human-readable message, matching the
/// wire contract the clients already rely on.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(label: Option<&str>, lat: Option<f64>, lng: Option<f64>) -> CreateLocationRequest {
        CreateLocationRequest {
            label: label.map(str::to_string),
            lat,
            lng,
        }
    }

    #[test]
    fn accepts_valid_coordinates() {
        let new = request(Some("Home"), Some(40.0), Some(-73.0)).validate().unwrap();
        assert_eq!(new.label, "Home");
        assert_eq!(new.lat, 40.0);
        assert_eq!(new.lng, -73.0);
    }

    #[test]
    fn accepts_boundary_coordinates() {
        assert!(request(Some("North Pole"), Some(90.0), Some(180.0)).validate().is_ok());
        assert!(request(Some("South Pole"), Some(-90.0), Some(-180.0)).validate().is_ok());
    }

    #[test]
    fn rejects_missing_or_blank_label() {
        let err = request(None, Some(0.0), Some(0.0)).validate().unwrap_err();
        assert_eq!(err, "invalid location data");
        let err = request(Some("   "), Some(0.0), Some(0.0)).validate().unwrap_err();
        assert_eq!(err, "invalid location data");
    }

    #[test]
    fn rejects_missing_coordinates() {
        let err = request(Some("Home"), None, Some(0.0)).validate().unwrap_err();
        assert_eq!(err, "invalid location data");
        let err = request(Some("Home"), Some(0.0), None).validate().unwrap_err();
        assert_eq!(err, "invalid location data");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let err = request(Some("Bad"), Some(200.0), Some(0.0)).validate().unwrap_err();
        assert_eq!(err, "invalid coordinates");
        let err = request(Some("Bad"), Some(0.0), Some(-180.5)).validate().unwrap_err();
        assert_eq!(err, "invalid coordinates");
    }

    #[test]
    fn label_is_checked_before_coordinate_range() {
        let err = request(None, Some(500.0), Some(500.0)).validate().unwrap_err();
        assert_eq!(err, "invalid location data");
    }
}
