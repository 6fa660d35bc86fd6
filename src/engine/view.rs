use crate::engine::progress::progress_for;
use crate::engine::status::status_for;
use crate::engine::timeline::{
    format_estimated_date, package_events, shipment_events, DEFAULT_DESTINATION, ORIGIN_FACILITY,
};
use crate::models::package::PackageRow;
use crate::models::shipment::ShipmentRow;
use crate::models::tracking::{
    EntityType, PackageInfo, RecipientInfo, ServiceInfo, TrackingData, TrackingEvent,
};
use crate::models::user::UserRow;

pub fn package_view(
    package: &PackageRow,
    parent: Option<&ShipmentRow>,
    owner: Option<&UserRow>,
) -> TrackingData {
    let destination = parent
        .and_then(ShipmentRow::destination)
        .or_else(|| owner.and_then(UserRow::destination))
        .unwrap_or_else(|| DEFAULT_DESTINATION.to_string());

    let events = package_events(package, &destination);
    let estimated_delivery = parent
        .and_then(|shipment| shipment.estimated_delivery)
        .or_else(|| final_stage(&events));

    TrackingData {
        tracking_number: package.tracking_number.clone(),
        entity_type: EntityType::Package,
        entity_id: package.id,
        shipment_tracking_number: parent.map(|shipment| shipment.tracking_number.clone()),
        status: status_for(EntityType::Package, &package.status),
        origin: ORIGIN_FACILITY.to_string(),
        destination,
        recipient: recipient(parent, owner),
        service: ServiceInfo {
            service_type: parent.and_then(|shipment| shipment.service_type.clone()),
            estimated_delivery,
            estimated_delivery_date: estimated_delivery.map(format_estimated_date),
        },
        package: PackageInfo {
            description: package.description.clone(),
            store_name: package.store_name.clone(),
            weight: package.weight,
            declared_value: package.declared_value,
            package_count: None,
        },
        events,
        progress: progress_for(&package.status, EntityType::Package),
        last_updated: package.updated_at,
    }
}

pub fn shipment_view(
    shipment: &ShipmentRow,
    package_count: Option<usize>,
    owner: Option<&UserRow>,
) -> TrackingData {
    let destination = shipment
        .destination()
        .or_else(|| owner.and_then(UserRow::destination))
        .unwrap_or_else(|| DEFAULT_DESTINATION.to_string());

    let events = shipment_events(shipment, &destination);
    let estimated_delivery = shipment.estimated_delivery.or_else(|| final_stage(&events));

    TrackingData {
        tracking_number: shipment.tracking_number.clone(),
        entity_type: EntityType::Shipment,
        entity_id: shipment.id,
        shipment_tracking_number: None,
        status: status_for(EntityType::Shipment, &shipment.status),
        origin: ORIGIN_FACILITY.to_string(),
        destination,
        recipient: recipient(Some(shipment), owner),
        service: ServiceInfo {
            service_type: shipment.service_type.clone(),
            estimated_delivery,
            estimated_delivery_date: estimated_delivery.map(format_estimated_date),
        },
        package: PackageInfo {
            description: None,
            store_name: None,
            weight: shipment.total_weight,
            declared_value: shipment.total_value,
            package_count,
        },
        events,
        progress: progress_for(&shipment.status, EntityType::Shipment),
        last_updated: shipment.updated_at,
    }
}

fn final_stage(events: &[TrackingEvent]) -> Option<chrono::DateTime<chrono::Utc>> {
    events.last().map(|event| event.timestamp)
}

fn recipient(shipment: Option<&ShipmentRow>, owner: Option<&UserRow>) -> RecipientInfo {
    RecipientInfo {
        name: shipment
            .and_then(|s| s.recipient_name.clone())
            .or_else(|| owner.map(UserRow::full_name)),
        phone: shipment
            .and_then(|s| s.recipient_phone.clone())
            .or_else(|| owner.and_then(|u| u.phone.clone())),
        email: shipment
            .and_then(|s| s.recipient_email.clone())
            .or_else(|| owner.and_then(|u| u.email.clone())),
        address: shipment
            .and_then(|s| s.delivery_address.clone())
            .or_else(|| owner.and_then(UserRow::mailing_address)),
    }
}
