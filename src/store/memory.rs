use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::package::{PackageRow, PackageShipmentLink};
use crate::models::shipment::ShipmentRow;
use crate::models::user::UserRow;
use crate::store::{LinkQuery, LinkedPackage, RepoResult, TrackingRepository};

#[derive(Default)]
pub struct InMemoryStore {
    users: DashMap<Uuid, UserRow>,
    packages: DashMap<Uuid, PackageRow>,
    shipments: DashMap<Uuid, ShipmentRow>,
    links: DashMap<(Uuid, Uuid), PackageShipmentLink>,
    tracking_numbers: DashMap<String, Uuid>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (self.users.len(), self.packages.len(), self.shipments.len())
    }

    pub fn insert_user(&self, user: UserRow) {
        self.users.insert(user.id, user);
    }

    pub fn insert_package(&self, package: PackageRow) {
        self.tracking_numbers
            .entry(package.tracking_number.clone())
            .or_insert(package.id);
        self.packages.insert(package.id, package);
    }

    pub fn insert_shipment(&self, shipment: ShipmentRow) {
        self.tracking_numbers
            .entry(shipment.tracking_number.clone())
            .or_insert(shipment.id);
        self.shipments.insert(shipment.id, shipment);
    }

    pub fn user_exists(&self, id: Uuid) -> bool {
        self.users.contains_key(&id)
    }

    // Claims the number for `entity_id` under the shard lock; false if already held.
    pub fn reserve_tracking_number(&self, tracking_number: &str, entity_id: Uuid) -> bool {
        match self.tracking_numbers.entry(tracking_number.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entity_id);
                true
            }
        }
    }

    pub fn link_package(
        &self,
        shipment_id: Uuid,
        package_id: Uuid,
        at: DateTime<Utc>,
    ) -> Option<PackageShipmentLink> {
        if !self.shipments.contains_key(&shipment_id) || !self.packages.contains_key(&package_id) {
            return None;
        }

        let link = self
            .links
            .entry((package_id, shipment_id))
            .or_insert_with(|| PackageShipmentLink {
                package_id,
                shipment_id,
                linked_at: at,
            });

        Some(link.value().clone())
    }

    pub fn update_package_status(
        &self,
        id: Uuid,
        status: &str,
        at: DateTime<Utc>,
    ) -> Option<PackageRow> {
        let mut package = self.packages.get_mut(&id)?;
        package.status = status.to_string();
        package.mark_stage_reached(status, at);
        package.updated_at = at;
        Some(package.clone())
    }

    pub fn update_shipment_status(
        &self,
        id: Uuid,
        status: &str,
        at: DateTime<Utc>,
    ) -> Option<ShipmentRow> {
        let mut shipment = self.shipments.get_mut(&id)?;
        shipment.status = status.to_string();
        shipment.updated_at = at;
        Some(shipment.clone())
    }

    fn joined(&self, link: &PackageShipmentLink) -> Option<LinkedPackage> {
        let package = self.packages.get(&link.package_id)?.value().clone();
        let shipment = self.shipments.get(&link.shipment_id)?.value().clone();
        let owner = self.users.get(&package.user_id).map(|user| user.value().clone());

        Some(LinkedPackage {
            package,
            shipment,
            owner,
            linked_at: link.linked_at,
        })
    }
}

impl TrackingRepository for InMemoryStore {
    async fn find_shipment(
        &self,
        tracking_number: &str,
        owner: Option<Uuid>,
    ) -> RepoResult<Option<ShipmentRow>> {
        Ok(self
            .shipments
            .iter()
            .filter(|entry| entry.tracking_number == tracking_number)
            .filter(|entry| owner.is_none_or(|owner| entry.user_id == owner))
            .map(|entry| entry.value().clone())
            .min_by_key(|shipment| shipment.created_at))
    }

    async fn find_package(&self, key: &str, owner: Option<Uuid>) -> RepoResult<Option<PackageRow>> {
        let id = Uuid::parse_str(key).ok();

        Ok(self
            .packages
            .iter()
            .filter(|entry| Some(entry.id) == id || entry.tracking_number == key)
            .filter(|entry| owner.is_none_or(|owner| entry.user_id == owner))
            .map(|entry| entry.value().clone())
            .min_by_key(|package| package.created_at))
    }

    async fn find_links(&self, query: LinkQuery) -> RepoResult<Vec<LinkedPackage>> {
        let mut rows: Vec<LinkedPackage> = self
            .links
            .iter()
            .filter_map(|entry| self.joined(entry.value()))
            .filter(|row| match &query {
                LinkQuery::Package(id) => row.package.id == *id,
                LinkQuery::ShipmentTracking(code) => row.shipment.tracking_number == *code,
            })
            .collect();

        rows.sort_by(|a, b| {
            a.linked_at
                .cmp(&b.linked_at)
                .then_with(|| a.package.tracking_number.cmp(&b.package.tracking_number))
        });

        Ok(rows)
    }

    async fn find_user(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }
}
