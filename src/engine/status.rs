use crate::models::tracking::{EntityType, StatusCategory, TrackingStatus};

pub const PACKAGE_STAGES: [&str; 7] = [
    "pending",
    "received",
    "processing",
    "shipped",
    "in_transit",
    "arrived",
    "delivered",
];

pub const SHIPMENT_STAGES: [&str; 9] = [
    "awaiting_quote",
    "quote_ready",
    "payment_received",
    "processing",
    "dispatched",
    "in_transit",
    "customs_clearance",
    "out_for_delivery",
    "delivered",
];

pub const SHIPMENT_BRANCH_STATUSES: [&str; 3] = ["delivery_attempted", "exception", "returned"];

// Returned for any status string missing from the table.
pub const EXCEPTION_STATUS: TrackingStatus = status(
    "EX-00",
    "Exception",
    "An issue requires attention",
    "Something unexpected happened with this item. Our support team has been notified and will contact you shortly.",
    "alert-triangle",
    "text-red-600",
    StatusCategory::Exception,
);

const fn status(
    code: &'static str,
    name: &'static str,
    description: &'static str,
    customer_message: &'static str,
    icon: &'static str,
    color: &'static str,
    category: StatusCategory,
) -> TrackingStatus {
    TrackingStatus {
        code,
        name,
        description,
        customer_message,
        icon,
        color,
        category,
    }
}

static PACKAGE_TABLE: [(&str, TrackingStatus); 7] = [
    (
        "pending",
        status(
            "PK-01",
            "Awaiting Arrival",
            "Package announced, not yet received at our facility",
            "We are expecting your package. It will be checked in as soon as it reaches our Miami facility.",
            "clock",
            "text-gray-500",
            StatusCategory::Pending,
        ),
    ),
    (
        "received",
        status(
            "PK-02",
            "Received at Facility",
            "Package checked in at the Miami intake facility",
            "Good news! Your package has arrived at our Miami facility and is queued for processing.",
            "package-check",
            "text-blue-600",
            StatusCategory::Processing,
        ),
    ),
    (
        "processing",
        status(
            "PK-03",
            "Processing",
            "Package is being inspected, weighed and prepared",
            "Your package is being inspected, weighed and prepared for international shipping.",
            "settings",
            "text-yellow-600",
            StatusCategory::Processing,
        ),
    ),
    (
        "shipped",
        status(
            "PK-04",
            "Shipped",
            "Package has left the Miami facility",
            "Your package is on its way. It has been handed over to our international freight partner.",
            "truck",
            "text-purple-600",
            StatusCategory::Transit,
        ),
    ),
    (
        "in_transit",
        status(
            "PK-05",
            "In Transit",
            "Package is travelling to the destination country",
            "Your package is in the air and travelling to its destination country.",
            "plane",
            "text-indigo-600",
            StatusCategory::Transit,
        ),
    ),
    (
        "arrived",
        status(
            "PK-06",
            "Arrived in Destination Country",
            "Package arrived and is clearing customs",
            "Your package has arrived in Ghana and is being cleared by customs.",
            "map-pin",
            "text-orange-600",
            StatusCategory::Transit,
        ),
    ),
    (
        "delivered",
        status(
            "PK-07",
            "Delivered",
            "Package delivered to the recipient",
            "Your package has been delivered. Thank you for shipping with Vanguard Cargo!",
            "check-circle",
            "text-green-600",
            StatusCategory::Delivered,
        ),
    ),
];

static SHIPMENT_TABLE: [(&str, TrackingStatus); 12] = [
    (
        "awaiting_quote",
        status(
            "SH-01",
            "Awaiting Quote",
            "Shipment request received, quote in preparation",
            "We have received your shipment request and are preparing your quote.",
            "file-text",
            "text-gray-500",
            StatusCategory::Pending,
        ),
    ),
    (
        "quote_ready",
        status(
            "SH-02",
            "Quote Ready",
            "Quote issued, awaiting customer confirmation",
            "Your shipping quote is ready. Please review and confirm it to continue.",
            "receipt",
            "text-blue-600",
            StatusCategory::Pending,
        ),
    ),
    (
        "payment_received",
        status(
            "SH-03",
            "Payment Received",
            "Payment confirmed for this shipment",
            "Thank you! Your payment has been confirmed and your shipment is scheduled.",
            "credit-card",
            "text-blue-600",
            StatusCategory::Pending,
        ),
    ),
    (
        "processing",
        status(
            "SH-04",
            "Consolidating",
            "Packages are being consolidated for dispatch",
            "Your packages are being consolidated and packed for dispatch.",
            "boxes",
            "text-yellow-600",
            StatusCategory::Processing,
        ),
    ),
    (
        "dispatched",
        status(
            "SH-05",
            "Dispatched",
            "Shipment has left the Miami facility",
            "Your shipment has been dispatched from our Miami facility.",
            "truck",
            "text-purple-600",
            StatusCategory::Transit,
        ),
    ),
    (
        "in_transit",
        status(
            "SH-06",
            "In Transit",
            "Shipment is on its international leg",
            "Your shipment is travelling to its destination country.",
            "plane",
            "text-indigo-600",
            StatusCategory::Transit,
        ),
    ),
    (
        "customs_clearance",
        status(
            "SH-07",
            "Customs Clearance",
            "Shipment is being cleared by customs",
            "Your shipment has arrived and is being cleared by the customs authority.",
            "shield-check",
            "text-orange-600",
            StatusCategory::Transit,
        ),
    ),
    (
        "out_for_delivery",
        status(
            "SH-08",
            "Out for Delivery",
            "Shipment is with the local delivery team",
            "Your shipment is out for delivery and will arrive soon.",
            "navigation",
            "text-teal-600",
            StatusCategory::Transit,
        ),
    ),
    (
        "delivered",
        status(
            "SH-09",
            "Delivered",
            "Shipment delivered to the recipient",
            "Your shipment has been delivered. Thank you for shipping with Vanguard Cargo!",
            "check-circle",
            "text-green-600",
            StatusCategory::Delivered,
        ),
    ),
    (
        "delivery_attempted",
        status(
            "SH-E1",
            "Delivery Attempted",
            "Delivery attempt was unsuccessful",
            "We tried to deliver your shipment but could not reach the recipient. We will try again on the next business day.",
            "phone-missed",
            "text-amber-600",
            StatusCategory::Exception,
        ),
    ),
    ("exception", EXCEPTION_STATUS),
    (
        "returned",
        status(
            "SH-E3",
            "Returned",
            "Shipment is being returned to the sender",
            "Your shipment is being returned. Please contact support for details.",
            "rotate-ccw",
            "text-red-600",
            StatusCategory::Exception,
        ),
    ),
];

fn table(entity: EntityType) -> &'static [(&'static str, TrackingStatus)] {
    match entity {
        EntityType::Package => &PACKAGE_TABLE,
        EntityType::Shipment => &SHIPMENT_TABLE,
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

// Display descriptor for a raw status, keyed by entity type so package and
// shipment stages sharing a literal (`delivered`, `in_transit`, ...) never
// shadow each other. Unknown strings map to `EXCEPTION_STATUS`.
pub fn status_for(entity: EntityType, raw: &str) -> TrackingStatus {
    let key = normalize(raw);
    table(entity)
        .iter()
        .find(|(status, _)| *status == key)
        .map(|(_, descriptor)| *descriptor)
        .unwrap_or(EXCEPTION_STATUS)
}

pub fn is_known_status(entity: EntityType, raw: &str) -> bool {
    let key = normalize(raw);
    table(entity).iter().any(|(status, _)| *status == key)
}

pub fn linear_stages(entity: EntityType) -> &'static [&'static str] {
    match entity {
        EntityType::Package => &PACKAGE_STAGES,
        EntityType::Shipment => &SHIPMENT_STAGES,
    }
}

// Zero-based position of `raw` in the entity's linear stage list.
pub fn stage_index(entity: EntityType, raw: &str) -> Option<usize> {
    let key = normalize(raw);
    linear_stages(entity).iter().position(|stage| *stage == key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_package_stage_has_its_own_entry() {
        for (idx, stage) in PACKAGE_STAGES.iter().enumerate() {
            let descriptor = status_for(EntityType::Package, stage);
            assert_eq!(descriptor, PACKAGE_TABLE[idx].1);
            assert_ne!(descriptor.code, EXCEPTION_STATUS.code);
        }
    }

    #[test]
    fn unknown_status_falls_back_to_exception() {
        for raw in ["", "   ", "lost_at_sea", "deliverd"] {
            assert_eq!(status_for(EntityType::Package, raw), EXCEPTION_STATUS);
            assert_eq!(status_for(EntityType::Shipment, raw), EXCEPTION_STATUS);
        }
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        assert_eq!(
            status_for(EntityType::Package, " In_Transit "),
            status_for(EntityType::Package, "in_transit")
        );
        assert_eq!(status_for(EntityType::Shipment, "DELIVERED").code, "SH-09");
    }

    #[test]
    fn shared_literals_resolve_per_entity() {
        let package = status_for(EntityType::Package, "delivered");
        let shipment = status_for(EntityType::Shipment, "delivered");
        assert_eq!(package.code, "PK-07");
        assert_eq!(shipment.code, "SH-09");

        assert_eq!(status_for(EntityType::Package, "in_transit").code, "PK-05");
        assert_eq!(status_for(EntityType::Shipment, "in_transit").code, "SH-06");
    }

    #[test]
    fn tables_have_no_duplicate_keys() {
        for entity in [EntityType::Package, EntityType::Shipment] {
            let keys: HashSet<&str> = table(entity).iter().map(|(key, _)| *key).collect();
            assert_eq!(keys.len(), table(entity).len());
        }
    }

    #[test]
    fn branch_statuses_are_known_but_not_linear() {
        for raw in SHIPMENT_BRANCH_STATUSES {
            assert!(is_known_status(EntityType::Shipment, raw));
            assert_eq!(stage_index(EntityType::Shipment, raw), None);
        }
        assert!(!is_known_status(EntityType::Package, "returned"));
    }
}
