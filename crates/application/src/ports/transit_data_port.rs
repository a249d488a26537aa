//! Transit data port
//!
//! Interface for the GTFS-style opendata lookups the resolver depends on.
//! Each call returns the full record set for one category as domain
//! entities; filtering and ordering are the resolver's responsibility.
//! Implementations perform a fresh network round-trip per call and must
//! not cache or return partial results on failure.

use async_trait::async_trait;
use domain::{Route, ShapePoint, Stop, StopTime, Trip};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for transit opendata lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitDataPort: Send + Sync {
    /// Fetch all routes of the agency
    async fn fetch_routes(&self) -> Result<Vec<Route>, ApplicationError>;

    /// Fetch all trips of the agency
    async fn fetch_trips(&self) -> Result<Vec<Trip>, ApplicationError>;

    /// Fetch all stop-time entries of the agency
    async fn fetch_stop_times(&self) -> Result<Vec<StopTime>, ApplicationError>;

    /// Fetch all stops of the agency
    async fn fetch_stops(&self) -> Result<Vec<Stop>, ApplicationError>;

    /// Fetch all shape points of the agency
    async fn fetch_shape_points(&self) -> Result<Vec<ShapePoint>, ApplicationError>;
}
