use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api::rest::assign_tracking_number;
use crate::api::rest::packages::{validated_status, UpdateStatusRequest};
use crate::error::AppError;
use crate::models::package::PackageShipmentLink;
use crate::models::shipment::ShipmentRow;
use crate::models::tracking::{EntityType, TrackingUpdate};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shipments", post(create_shipment))
        .route("/shipments/:id/status", patch(update_shipment_status))
        .route("/shipments/:id/packages", post(link_package))
}

#[derive(Deserialize)]
pub struct CreateShipmentRequest {
    pub user_id: Uuid,
    pub tracking_number: Option<String>,
    pub status: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub recipient_email: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_city: Option<String>,
    pub delivery_country: Option<String>,
    pub total_weight: Option<f64>,
    pub total_value: Option<f64>,
    pub service_type: Option<String>,
    pub estimated_delivery: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct LinkPackageRequest {
    pub package_id: Uuid,
}

async fn create_shipment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateShipmentRequest>,
) -> Result<Json<ShipmentRow>, AppError> {
    if !state.store.user_exists(payload.user_id) {
        return Err(AppError::NotFound(format!(
            "user {} not found",
            payload.user_id
        )));
    }

    let status = validated_status(
        EntityType::Shipment,
        payload.status.as_deref().unwrap_or("awaiting_quote"),
    )?;
    let id = Uuid::new_v4();
    let tracking_number = assign_tracking_number(&state, id, payload.tracking_number, "VC-SHP")?;
    let now = Utc::now();

    let shipment = ShipmentRow {
        id,
        tracking_number,
        user_id: payload.user_id,
        status,
        recipient_name: payload.recipient_name,
        recipient_phone: payload.recipient_phone,
        recipient_email: payload.recipient_email,
        delivery_address: payload.delivery_address,
        delivery_city: payload.delivery_city,
        delivery_country: payload.delivery_country,
        total_weight: payload.total_weight,
        total_value: payload.total_value,
        service_type: payload.service_type,
        estimated_delivery: payload.estimated_delivery,
        created_at: now,
        updated_at: now,
    };

    state.store.insert_shipment(shipment.clone());
    info!(shipment_id = %shipment.id, tracking_number = %shipment.tracking_number, "shipment created");

    Ok(Json(shipment))
}

async fn update_shipment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ShipmentRow>, AppError> {
    let status = validated_status(EntityType::Shipment, &payload.status)?;

    let shipment = state
        .store
        .update_shipment_status(id, &status, Utc::now())
        .ok_or_else(|| AppError::NotFound(format!("shipment {} not found", id)))?;

    state.publish_update(TrackingUpdate {
        entity_type: EntityType::Shipment,
        entity_id: shipment.id,
        tracking_number: shipment.tracking_number.clone(),
        status: shipment.status.clone(),
        updated_at: shipment.updated_at,
    });

    Ok(Json(shipment))
}

async fn link_package(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinkPackageRequest>,
) -> Result<Json<PackageShipmentLink>, AppError> {
    let link = state
        .store
        .link_package(id, payload.package_id, Utc::now())
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "shipment {} or package {} not found",
                id, payload.package_id
            ))
        })?;

    info!(shipment_id = %id, package_id = %payload.package_id, "package linked to shipment");
    Ok(Json(link))
}
