//! Map-matching adapter - Implements MapMatchingPort using integration_geoapify

use application::error::ApplicationError;
use application::ports::MapMatchingPort;
use async_trait::async_trait;
use domain::value_objects::GeoPoint;
use integration_geoapify::{GeoapifyError, GeoapifyMatchingClient, MapMatcher};
use tracing::instrument;

/// Adapter for the Geoapify map-matching API
pub struct GeoapifyAdapter {
    client: GeoapifyMatchingClient,
}

impl std::fmt::Debug for GeoapifyAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoapifyAdapter")
            .field("client", &"GeoapifyMatchingClient")
            .finish()
    }
}

impl GeoapifyAdapter {
    /// Create a new adapter over an initialised client
    #[must_use]
    pub const fn new(client: GeoapifyMatchingClient) -> Self {
        Self { client }
    }

    fn map_err(e: GeoapifyError) -> ApplicationError {
        match e {
            // A sub-2-waypoint batch is a resolver bug, not a service fault
            GeoapifyError::TooFewWaypoints(_) => {
                ApplicationError::Internal(format!("Map-matching request rejected: {e}"))
            },
            other => ApplicationError::ExternalService(format!("Map-matching failed: {other}")),
        }
    }
}

#[async_trait]
impl MapMatchingPort for GeoapifyAdapter {
    #[instrument(skip(self), fields(waypoints = waypoints.len()))]
    async fn match_waypoints(
        &self,
        waypoints: &[GeoPoint],
    ) -> Result<Vec<GeoPoint>, ApplicationError> {
        self.client
            .match_waypoints(waypoints)
            .await
            .map_err(Self::map_err)
    }
}
