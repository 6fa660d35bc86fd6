use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::view::{package_view, shipment_view};
use crate::error::{RepositoryError, TrackingError};
use crate::models::tracking::TrackingData;
use crate::models::user::UserRow;
use crate::store::{LinkQuery, RepoResult, TrackingRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Shipment,
    Package,
    NestedPackage,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [Strategy::Shipment, Strategy::Package, Strategy::NestedPackage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Shipment => "shipment",
            Strategy::Package => "package",
            Strategy::NestedPackage => "nested_package",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub strategy: Strategy,
    pub data: TrackingData,
}

pub struct TrackingResolver<R> {
    repo: Arc<R>,
}

impl<R> Clone for TrackingResolver<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: TrackingRepository> TrackingResolver<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn resolve(
        &self,
        tracking_number: &str,
        requesting_user: Option<Uuid>,
    ) -> Result<TrackingData, TrackingError> {
        self.resolve_detailed(tracking_number, requesting_user)
            .await
            .map(|resolved| resolved.data)
    }

    // First matching strategy wins. A strategy whose reads fail counts as a
    // miss; only when every strategy failed is the result a transport error.
    pub async fn resolve_detailed(
        &self,
        tracking_number: &str,
        requesting_user: Option<Uuid>,
    ) -> Result<Resolved, TrackingError> {
        let code = tracking_number.trim();
        let not_found = || TrackingError::NotFound {
            tracking_number: tracking_number.to_string(),
        };

        if code.is_empty() {
            return Err(not_found());
        }

        let mut failures: Vec<RepositoryError> = Vec::new();

        for strategy in Strategy::ORDER {
            let attempt = match strategy {
                Strategy::Shipment => self.lookup_shipment(code, requesting_user).await,
                Strategy::Package => self.lookup_package(code, requesting_user).await,
                Strategy::NestedPackage => self.lookup_nested_package(code, requesting_user).await,
            };

            match attempt {
                Ok(Some(data)) => {
                    info!(
                        tracking_number = %code,
                        strategy = strategy.as_str(),
                        status = data.status.code,
                        "tracking number resolved"
                    );
                    return Ok(Resolved { strategy, data });
                }
                Ok(None) => {
                    debug!(tracking_number = %code, strategy = strategy.as_str(), "no match");
                }
                Err(err) => {
                    warn!(
                        tracking_number = %code,
                        strategy = strategy.as_str(),
                        error = %err,
                        "lookup step failed; trying next strategy"
                    );
                    failures.push(err);
                }
            }
        }

        if failures.len() == Strategy::ORDER.len() {
            let reasons: Vec<String> = failures.iter().map(ToString::to_string).collect();
            return Err(TrackingError::Transport(reasons.join("; ")));
        }

        Err(not_found())
    }

    async fn lookup_shipment(
        &self,
        code: &str,
        requesting_user: Option<Uuid>,
    ) -> RepoResult<Option<TrackingData>> {
        let Some(shipment) = self.repo.find_shipment(code, requesting_user).await? else {
            return Ok(None);
        };

        let package_count = match self
            .repo
            .find_links(LinkQuery::ShipmentTracking(shipment.tracking_number.clone()))
            .await
        {
            Ok(links) => Some(links.len()),
            Err(err) => {
                warn!(shipment_id = %shipment.id, error = %err, "package count unavailable");
                None
            }
        };

        let owner = self.owner(shipment.user_id).await;
        Ok(Some(shipment_view(&shipment, package_count, owner.as_ref())))
    }

    async fn lookup_package(
        &self,
        code: &str,
        requesting_user: Option<Uuid>,
    ) -> RepoResult<Option<TrackingData>> {
        let Some(package) = self.repo.find_package(code, requesting_user).await? else {
            return Ok(None);
        };

        let latest_link = match self.repo.find_links(LinkQuery::Package(package.id)).await {
            Ok(links) => links.into_iter().last(),
            Err(err) => {
                warn!(package_id = %package.id, error = %err, "shipment link unavailable");
                None
            }
        };

        let (parent, owner) = match latest_link {
            Some(link) => {
                let owner = match link.owner {
                    Some(owner) => Some(owner),
                    None => self.owner(package.user_id).await,
                };
                (Some(link.shipment), owner)
            }
            None => (None, self.owner(package.user_id).await),
        };

        Ok(Some(package_view(&package, parent.as_ref(), owner.as_ref())))
    }

    // Treats `code` as a shipment code and shows the first package inside
    // it, restricted to the requester's packages when a requester is known.
    async fn lookup_nested_package(
        &self,
        code: &str,
        requesting_user: Option<Uuid>,
    ) -> RepoResult<Option<TrackingData>> {
        let links = self
            .repo
            .find_links(LinkQuery::ShipmentTracking(code.to_string()))
            .await?;

        let first = links.into_iter().find(|link| {
            requesting_user.is_none_or(|user| link.package.user_id == user)
        });

        Ok(first.map(|link| {
            package_view(&link.package, Some(&link.shipment), link.owner.as_ref())
        }))
    }

    async fn owner(&self, user_id: Uuid) -> Option<UserRow> {
        match self.repo.find_user(user_id).await {
            Ok(user) => user,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "owner details unavailable");
                None
            }
        }
    }
}
