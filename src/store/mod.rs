pub mod memory;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::package::PackageRow;
use crate::models::shipment::ShipmentRow;
use crate::models::user::UserRow;

pub use memory::InMemoryStore;

pub type RepoResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkQuery {
    Package(Uuid),
    ShipmentTracking(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkedPackage {
    pub package: PackageRow,
    pub shipment: ShipmentRow,
    pub owner: Option<UserRow>,
    pub linked_at: DateTime<Utc>,
}

pub trait TrackingRepository: Send + Sync {
    fn find_shipment(
        &self,
        tracking_number: &str,
        owner: Option<Uuid>,
    ) -> impl Future<Output = RepoResult<Option<ShipmentRow>>> + Send;

    fn find_package(
        &self,
        key: &str,
        owner: Option<Uuid>,
    ) -> impl Future<Output = RepoResult<Option<PackageRow>>> + Send;

    fn find_links(
        &self,
        query: LinkQuery,
    ) -> impl Future<Output = RepoResult<Vec<LinkedPackage>>> + Send;

    fn find_user(&self, id: Uuid) -> impl Future<Output = RepoResult<Option<UserRow>>> + Send;
}
