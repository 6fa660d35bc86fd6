use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

// Failure reported by the data layer itself. "No rows" is not an error and
// is expressed as `Ok(None)` or an empty list.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RepositoryError {
    #[error("data layer unavailable: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    #[error("No package or shipment found with tracking number {tracking_number}")]
    NotFound { tracking_number: String },

    #[error("tracking lookup failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TrackingError> for AppError {
    fn from(err: TrackingError) -> Self {
        match err {
            TrackingError::NotFound { .. } => AppError::NotFound(err.to_string()),
            TrackingError::Transport(_) => AppError::Unavailable(
                "tracking is temporarily unavailable, please try again later".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
