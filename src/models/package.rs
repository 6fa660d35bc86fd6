use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageRow {
    pub id: Uuid,
    pub tracking_number: String,
    pub user_id: Uuid,
    pub status: String,
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub declared_value: Option<f64>,
    pub weight: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub received_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub in_transit_at: Option<DateTime<Utc>>,
    pub arrived_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl PackageRow {
    pub fn stage_timestamp(&self, stage: &str) -> Option<DateTime<Utc>> {
        match stage {
            "pending" => Some(self.created_at),
            "received" => self.received_at,
            "processing" => self.processed_at,
            "shipped" => self.shipped_at,
            "in_transit" => self.in_transit_at,
            "arrived" => self.arrived_at,
            "delivered" => self.delivered_at,
            _ => None,
        }
    }

    pub fn mark_stage_reached(&mut self, stage: &str, at: DateTime<Utc>) {
        let slot = match stage {
            "received" => &mut self.received_at,
            "processing" => &mut self.processed_at,
            "shipped" => &mut self.shipped_at,
            "in_transit" => &mut self.in_transit_at,
            "arrived" => &mut self.arrived_at,
            "delivered" => &mut self.delivered_at,
            _ => return,
        };

        if slot.is_none() {
            *slot = Some(at);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageShipmentLink {
    pub package_id: Uuid,
    pub shipment_id: Uuid,
    pub linked_at: DateTime<Utc>,
}
