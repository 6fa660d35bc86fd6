use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Package,
    Shipment,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Package => "package",
            EntityType::Shipment => "shipment",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Pending,
    Processing,
    Transit,
    Delivered,
    Exception,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TrackingStatus {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub customer_message: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub category: StatusCategory,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackingEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub status: TrackingStatus,
    pub description: String,
    pub details: Option<String>,
    pub completed: bool,
    pub estimated_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub current_step: usize,
    pub total_steps: usize,
    pub percentage: u8,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RecipientInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ServiceInfo {
    pub service_type: Option<String>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub estimated_delivery_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PackageInfo {
    pub description: Option<String>,
    pub store_name: Option<String>,
    pub weight: Option<f64>,
    pub declared_value: Option<f64>,
    pub package_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackingData {
    pub tracking_number: String,
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub shipment_tracking_number: Option<String>,
    pub status: TrackingStatus,
    pub origin: String,
    pub destination: String,
    pub recipient: RecipientInfo,
    pub service: ServiceInfo,
    pub package: PackageInfo,
    pub events: Vec<TrackingEvent>,
    pub progress: Progress,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingUpdate {
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub tracking_number: String,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}
