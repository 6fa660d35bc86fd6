use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::shipment::join_place;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl UserRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn destination(&self) -> Option<String> {
        join_place(self.city.as_deref(), self.country.as_deref())
    }

    pub fn mailing_address(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.street_address.as_deref(),
            self.city.as_deref(),
            self.country.as_deref(),
            self.postal_code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
