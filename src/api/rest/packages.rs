use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api::rest::assign_tracking_number;
use crate::engine::status::is_known_status;
use crate::error::AppError;
use crate::models::package::PackageRow;
use crate::models::tracking::{EntityType, TrackingUpdate};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/packages", post(create_package))
        .route("/packages/:id/status", patch(update_package_status))
}

#[derive(Deserialize)]
pub struct CreatePackageRequest {
    pub user_id: Uuid,
    pub tracking_number: Option<String>,
    pub status: Option<String>,
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub declared_value: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub(crate) fn validated_status(entity: EntityType, raw: &str) -> Result<String, AppError> {
    let status = raw.trim().to_ascii_lowercase();
    if !is_known_status(entity, &status) {
        return Err(AppError::BadRequest(format!(
            "unknown {} status: {raw}",
            entity.as_str()
        )));
    }
    Ok(status)
}

async fn create_package(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePackageRequest>,
) -> Result<Json<PackageRow>, AppError> {
    if !state.store.user_exists(payload.user_id) {
        return Err(AppError::NotFound(format!(
            "user {} not found",
            payload.user_id
        )));
    }

    let status = validated_status(
        EntityType::Package,
        payload.status.as_deref().unwrap_or("pending"),
    )?;
    let id = Uuid::new_v4();
    let tracking_number = assign_tracking_number(&state, id, payload.tracking_number, "VC-PKG")?;
    let now = Utc::now();

    let package = PackageRow {
        id,
        tracking_number,
        user_id: payload.user_id,
        status,
        store_name: payload.store_name,
        description: payload.description,
        declared_value: payload.declared_value,
        weight: payload.weight,
        created_at: now,
        received_at: None,
        processed_at: None,
        shipped_at: None,
        in_transit_at: None,
        arrived_at: None,
        delivered_at: None,
        updated_at: now,
    };

    state.store.insert_package(package.clone());
    info!(package_id = %package.id, tracking_number = %package.tracking_number, "package created");

    Ok(Json(package))
}

async fn update_package_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<PackageRow>, AppError> {
    let status = validated_status(EntityType::Package, &payload.status)?;

    let package = state
        .store
        .update_package_status(id, &status, Utc::now())
        .ok_or_else(|| AppError::NotFound(format!("package {} not found", id)))?;

    state.publish_update(TrackingUpdate {
        entity_type: EntityType::Package,
        entity_id: package.id,
        tracking_number: package.tracking_number.clone(),
        status: package.status.clone(),
        updated_at: package.updated_at,
    });

    Ok(Json(package))
}
