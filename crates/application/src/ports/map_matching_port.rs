//! Map-matching port
//!
//! Interface for snapping an ordered waypoint batch onto road geometry.

use async_trait::async_trait;
use domain::value_objects::GeoPoint;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for map-matching a waypoint batch
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MapMatchingPort: Send + Sync {
    /// Snap an ordered waypoint sequence onto road geometry
    ///
    /// Returns the matched points in input order. An error marks the whole
    /// batch as unmatched; the resolver decides what that means.
    async fn match_waypoints(
        &self,
        waypoints: &[GeoPoint],
    ) -> Result<Vec<GeoPoint>, ApplicationError>;
}
