pub mod packages;
pub mod shipments;
pub mod tracking;
pub mod users;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// Tracking numbers are unique across packages and shipments.
pub(crate) fn assign_tracking_number(
    state: &AppState,
    entity_id: Uuid,
    requested: Option<String>,
    prefix: &str,
) -> Result<String, AppError> {
    let tracking_number = match requested.map(|raw| raw.trim().to_string()) {
        Some(raw) if raw.is_empty() => {
            return Err(AppError::BadRequest(
                "tracking_number cannot be empty".to_string(),
            ));
        }
        Some(raw) => raw,
        None => {
            let suffix = Uuid::new_v4().simple().to_string()[..10].to_uppercase();
            format!("{prefix}-{suffix}")
        }
    };

    if !state.store.reserve_tracking_number(&tracking_number, entity_id) {
        return Err(AppError::Conflict(format!(
            "tracking number {tracking_number} already exists"
        )));
    }

    Ok(tracking_number)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(tracking::router())
        .merge(users::router())
        .merge(packages::router())
        .merge(shipments::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .fallback_service(ServeDir::new("static"))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    users: usize,
    packages: usize,
    shipments: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (users, packages, shipments) = state.store.counts();
    Json(HealthResponse {
        status: "ok",
        users,
        packages,
        shipments,
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
