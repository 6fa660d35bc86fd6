use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::engine::status::{stage_index, status_for};
use crate::models::package::PackageRow;
use crate::models::shipment::ShipmentRow;
use crate::models::tracking::{EntityType, TrackingEvent};

pub const ORIGIN_FACILITY: &str = "Vanguard Cargo Facility, Miami, FL";
pub const DEFAULT_DESTINATION: &str = "Accra, Ghana";

const DEPARTURE_AIRPORT: &str = "Miami International Airport, FL";
const CUSTOMS_AUTHORITY: &str = "Ghana Customs Authority, Accra";
const AIR_FREIGHT: &str = "International air freight";
const UNKNOWN_STORE: &str = "the retailer";

#[derive(Debug, Clone, Copy)]
enum Location {
    Store,
    Facility,
    Airport,
    AirFreight,
    Customs,
    Destination,
}

struct StageSpec {
    status: &'static str,
    offset_hours: i64,
    location: Location,
    description: &'static str,
    details: Option<&'static str>,
}

const PACKAGE_TIMELINE: [StageSpec; 7] = [
    StageSpec {
        status: "pending",
        offset_hours: 0,
        location: Location::Store,
        description: "Order placed with {store}",
        details: Some("Your package is on its way from {store} to our Miami facility."),
    },
    StageSpec {
        status: "received",
        offset_hours: 24,
        location: Location::Facility,
        description: "Received at Vanguard Cargo Facility",
        details: Some("Package from {store} was checked in, photographed and logged."),
    },
    StageSpec {
        status: "processing",
        offset_hours: 12,
        location: Location::Facility,
        description: "Inspected and prepared for shipping",
        details: Some("Weight and dimensions verified; package repacked for international transit."),
    },
    StageSpec {
        status: "shipped",
        offset_hours: 24,
        location: Location::Airport,
        description: "Departed Miami facility",
        details: Some("Package handed over to our international freight partner."),
    },
    StageSpec {
        status: "in_transit",
        offset_hours: 12,
        location: Location::AirFreight,
        description: "In transit to {city}",
        details: None,
    },
    StageSpec {
        status: "arrived",
        offset_hours: 5 * 24,
        location: Location::Customs,
        description: "Arrived in Ghana",
        details: Some("Package is being processed by the Ghana Customs Authority."),
    },
    StageSpec {
        status: "delivered",
        offset_hours: 2 * 24,
        location: Location::Destination,
        description: "Delivered in {city}",
        details: None,
    },
];

const SHIPMENT_TIMELINE: [StageSpec; 9] = [
    StageSpec {
        status: "awaiting_quote",
        offset_hours: 0,
        location: Location::Facility,
        description: "Shipment request received",
        details: None,
    },
    StageSpec {
        status: "quote_ready",
        offset_hours: 24,
        location: Location::Facility,
        description: "Shipping quote issued",
        details: Some("Quote covers consolidation, freight and customs handling to {city}."),
    },
    StageSpec {
        status: "payment_received",
        offset_hours: 2 * 24,
        location: Location::Facility,
        description: "Payment confirmed",
        details: None,
    },
    StageSpec {
        status: "processing",
        offset_hours: 12,
        location: Location::Facility,
        description: "Packages consolidated",
        details: Some("All packages in this shipment were consolidated and sealed for dispatch."),
    },
    StageSpec {
        status: "dispatched",
        offset_hours: 24,
        location: Location::Airport,
        description: "Dispatched from Miami",
        details: None,
    },
    StageSpec {
        status: "in_transit",
        offset_hours: 12,
        location: Location::AirFreight,
        description: "In transit to {city}",
        details: None,
    },
    StageSpec {
        status: "customs_clearance",
        offset_hours: 5 * 24,
        location: Location::Customs,
        description: "Clearing customs",
        details: Some("Shipment documents and contents are under review by customs."),
    },
    StageSpec {
        status: "out_for_delivery",
        offset_hours: 2 * 24,
        location: Location::Destination,
        description: "Out for delivery in {city}",
        details: None,
    },
    StageSpec {
        status: "delivered",
        offset_hours: 24,
        location: Location::Destination,
        description: "Delivered in {city}",
        details: Some("Shipment handed to the recipient."),
    },
];

struct Placeholders<'a> {
    store: &'a str,
    destination: &'a str,
}

impl Placeholders<'_> {
    fn city(&self) -> &str {
        self.destination
            .split(',')
            .next()
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .unwrap_or(self.destination)
    }

    fn fill(&self, template: &str) -> String {
        template
            .replace("{store}", self.store)
            .replace("{city}", self.city())
    }

    fn location(&self, location: Location) -> String {
        match location {
            Location::Store => self.store.to_string(),
            Location::Facility => ORIGIN_FACILITY.to_string(),
            Location::Airport => DEPARTURE_AIRPORT.to_string(),
            Location::AirFreight => AIR_FREIGHT.to_string(),
            Location::Customs => CUSTOMS_AUTHORITY.to_string(),
            Location::Destination => self.destination.to_string(),
        }
    }
}

pub fn format_estimated_date(at: DateTime<Utc>) -> String {
    at.format("%A, %B %-d, %Y").to_string()
}

pub fn package_events(package: &PackageRow, destination: &str) -> Vec<TrackingEvent> {
    let placeholders = Placeholders {
        store: package
            .store_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNKNOWN_STORE),
        destination,
    };

    build_events(
        EntityType::Package,
        package.id,
        &package.status,
        package.created_at,
        &PACKAGE_TIMELINE,
        |stage| package.stage_timestamp(stage),
        &placeholders,
    )
}

// Full nine-stage timeline for a shipment. Shipments persist no per-stage
// timestamps, so every stage after the first is synthesized.
pub fn shipment_events(shipment: &ShipmentRow, destination: &str) -> Vec<TrackingEvent> {
    let placeholders = Placeholders {
        store: UNKNOWN_STORE,
        destination,
    };

    build_events(
        EntityType::Shipment,
        shipment.id,
        &shipment.status,
        shipment.created_at,
        &SHIPMENT_TIMELINE,
        |stage| (stage == "awaiting_quote").then_some(shipment.created_at),
        &placeholders,
    )
}

fn build_events<F>(
    entity: EntityType,
    entity_id: Uuid,
    current_status: &str,
    anchor: DateTime<Utc>,
    stages: &[StageSpec],
    persisted: F,
    placeholders: &Placeholders<'_>,
) -> Vec<TrackingEvent>
where
    F: Fn(&str) -> Option<DateTime<Utc>>,
{
    let current_index = stage_index(entity, current_status);
    let mut previous = anchor;

    stages
        .iter()
        .enumerate()
        .map(|(idx, stage)| {
            let timestamp = persisted(stage.status)
                .unwrap_or_else(|| previous + Duration::hours(stage.offset_hours));
            previous = timestamp;

            let completed = current_index.is_some_and(|current| idx <= current);

            TrackingEvent {
                id: format!("{entity_id}-{}", stage.status),
                timestamp,
                location: placeholders.location(stage.location),
                status: status_for(entity, stage.status),
                description: placeholders.fill(stage.description),
                details: stage.details.map(|details| placeholders.fill(details)),
                completed,
                estimated_date: (!completed).then(|| format_estimated_date(timestamp)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::{package_events, shipment_events, DEFAULT_DESTINATION, ORIGIN_FACILITY};
    use crate::engine::status::{PACKAGE_STAGES, SHIPMENT_STAGES};
    use crate::models::package::PackageRow;
    use crate::models::shipment::ShipmentRow;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn package(status: &str) -> PackageRow {
        PackageRow {
            id: Uuid::from_u128(7),
            tracking_number: "VC-PKG-0007".to_string(),
            user_id: Uuid::from_u128(1),
            status: status.to_string(),
            store_name: Some("Amazon".to_string()),
            description: Some("Headphones".to_string()),
            declared_value: Some(120.0),
            weight: Some(1.2),
            created_at: created(),
            received_at: None,
            processed_at: None,
            shipped_at: None,
            in_transit_at: None,
            arrived_at: None,
            delivered_at: None,
            updated_at: created(),
        }
    }

    fn shipment(status: &str) -> ShipmentRow {
        ShipmentRow {
            id: Uuid::from_u128(9),
            tracking_number: "VC-SHP-0009".to_string(),
            user_id: Uuid::from_u128(1),
            status: status.to_string(),
            recipient_name: None,
            recipient_phone: None,
            recipient_email: None,
            delivery_address: None,
            delivery_city: Some("Kumasi".to_string()),
            delivery_country: Some("Ghana".to_string()),
            total_weight: None,
            total_value: None,
            service_type: None,
            estimated_delivery: None,
            created_at: created(),
            updated_at: created(),
        }
    }

    #[test]
    fn package_timeline_always_has_seven_entries() {
        for status in PACKAGE_STAGES.iter().copied().chain(["bogus"]) {
            let events = package_events(&package(status), DEFAULT_DESTINATION);
            assert_eq!(events.len(), 7);
        }
    }

    #[test]
    fn completion_flags_split_at_current_stage() {
        for (current, status) in PACKAGE_STAGES.iter().enumerate() {
            let events = package_events(&package(status), DEFAULT_DESTINATION);
            for (idx, event) in events.iter().enumerate() {
                assert_eq!(event.completed, idx <= current, "{status} at {idx}");
                assert_eq!(event.estimated_date.is_some(), !event.completed);
            }
        }
    }

    #[test]
    fn unknown_status_completes_nothing() {
        let events = package_events(&package("misrouted"), DEFAULT_DESTINATION);
        assert!(events.iter().all(|event| !event.completed));
    }

    #[test]
    fn shipped_package_synthesizes_missing_stages() {
        let events = package_events(&package("shipped"), DEFAULT_DESTINATION);

        let shipped = &events[3];
        let in_transit = &events[4];
        assert!(shipped.completed);
        assert!(!in_transit.completed);
        assert_eq!(shipped.timestamp, created() + Duration::hours(60));
        assert_eq!(in_transit.timestamp - shipped.timestamp, Duration::hours(12));
        assert_eq!(
            in_transit.estimated_date.as_deref(),
            Some("Saturday, January 4, 2025")
        );
    }

    #[test]
    fn persisted_timestamps_take_precedence() {
        let mut row = package("processing");
        let received = Utc.with_ymd_and_hms(2025, 1, 5, 9, 30, 0).unwrap();
        row.received_at = Some(received);

        let events = package_events(&row, DEFAULT_DESTINATION);
        assert_eq!(events[0].timestamp, created());
        assert_eq!(events[1].timestamp, received);
        assert_eq!(events[2].timestamp, received + Duration::hours(12));
    }

    #[test]
    fn prose_and_locations_are_parameterized() {
        let events = package_events(&package("received"), "Tema, Ghana");
        assert_eq!(events[0].description, "Order placed with Amazon");
        assert_eq!(events[0].location, "Amazon");
        assert_eq!(events[1].location, ORIGIN_FACILITY);
        assert_eq!(events[4].description, "In transit to Tema");
        assert_eq!(events[5].location, "Ghana Customs Authority, Accra");
        assert_eq!(events[6].location, "Tema, Ghana");
        assert_eq!(events[1].id, format!("{}-received", Uuid::from_u128(7)));
    }

    #[test]
    fn shipment_timeline_has_nine_entries_even_on_branch_status() {
        let events = shipment_events(&shipment("delivery_attempted"), "Kumasi, Ghana");
        assert_eq!(events.len(), 9);
        assert!(events.iter().all(|event| !event.completed));

        let names: Vec<&str> = events.iter().map(|event| event.status.code).collect();
        assert_eq!(names.first(), Some(&"SH-01"));
        assert_eq!(names.last(), Some(&"SH-09"));
    }

    #[test]
    fn shipment_stages_follow_lifecycle_order() {
        let events = shipment_events(&shipment("in_transit"), "Kumasi, Ghana");
        let ids: Vec<String> = events.iter().map(|event| event.id.clone()).collect();
        let expected: Vec<String> = SHIPMENT_STAGES
            .iter()
            .map(|stage| format!("{}-{stage}", Uuid::from_u128(9)))
            .collect();
        assert_eq!(ids, expected);
        assert_eq!(events.iter().filter(|event| event.completed).count(), 6);
        assert!(events.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }
}
