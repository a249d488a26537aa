//! Transit data adapter - Implements TransitDataPort using integration_tranzy

use application::error::ApplicationError;
use application::ports::TransitDataPort;
use async_trait::async_trait;
use domain::value_objects::GeoPoint;
use domain::{Route, ShapePoint, Stop, StopTime, Trip};
use integration_tranzy::{
    RouteRecord, ShapePointRecord, StopRecord, StopTimeRecord, TranzyApi, TranzyError,
    TranzyOpendataClient, TripRecord,
};
use tracing::{instrument, warn};

/// Adapter for the Tranzy opendata API
pub struct TranzyAdapter {
    client: TranzyOpendataClient,
}

impl std::fmt::Debug for TranzyAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranzyAdapter")
            .field("client", &"TranzyOpendataClient")
            .finish()
    }
}

impl TranzyAdapter {
    /// Create a new adapter over an initialised client
    #[must_use]
    pub const fn new(client: TranzyOpendataClient) -> Self {
        Self { client }
    }

    fn map_err(e: TranzyError) -> ApplicationError {
        ApplicationError::ExternalService(format!("Transit data fetch failed: {e}"))
    }

    fn convert_route(record: RouteRecord) -> Route {
        let route = Route::new(record.route_id.to_string(), record.route_short_name);
        match record.route_long_name {
            Some(long_name) => route.with_long_name(long_name),
            None => route,
        }
    }

    fn convert_trip(record: TripRecord) -> Trip {
        let trip = Trip::new(record.trip_id, record.route_id.to_string());
        match record.shape_id {
            Some(shape_id) => trip.with_shape(shape_id),
            None => trip,
        }
    }

    fn convert_stop_time(record: StopTimeRecord) -> StopTime {
        StopTime {
            trip_id: record.trip_id,
            stop_id: record.stop_id.to_string(),
            sequence: record.stop_sequence,
        }
    }

    /// Convert a stop record, dropping entries with out-of-range coordinates
    fn convert_stop(record: StopRecord) -> Option<Stop> {
        match GeoPoint::new(record.stop_lon, record.stop_lat) {
            Ok(position) => Some(Stop::new(
                record.stop_id.to_string(),
                record.stop_name,
                position,
            )),
            Err(e) => {
                warn!(stop_id = record.stop_id, %e, "Dropping stop with invalid coordinates");
                None
            },
        }
    }

    /// Convert a shape point record, dropping out-of-range coordinates
    fn convert_shape_point(record: ShapePointRecord) -> Option<ShapePoint> {
        match GeoPoint::new(record.shape_pt_lon, record.shape_pt_lat) {
            Ok(position) => Some(ShapePoint::new(
                record.shape_id,
                position,
                record.shape_pt_sequence,
            )),
            Err(e) => {
                warn!(%e, "Dropping shape point with invalid coordinates");
                None
            },
        }
    }
}

#[async_trait]
impl TransitDataPort for TranzyAdapter {
    #[instrument(skip(self))]
    async fn fetch_routes(&self) -> Result<Vec<Route>, ApplicationError> {
        let records = self.client.fetch_routes().await.map_err(Self::map_err)?;
        Ok(records.into_iter().map(Self::convert_route).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_trips(&self) -> Result<Vec<Trip>, ApplicationError> {
        let records = self.client.fetch_trips().await.map_err(Self::map_err)?;
        Ok(records.into_iter().map(Self::convert_trip).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_stop_times(&self) -> Result<Vec<StopTime>, ApplicationError> {
        let records = self
            .client
            .fetch_stop_times()
            .await
            .map_err(Self::map_err)?;
        Ok(records.into_iter().map(Self::convert_stop_time).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_stops(&self) -> Result<Vec<Stop>, ApplicationError> {
        let records = self.client.fetch_stops().await.map_err(Self::map_err)?;
        Ok(records.into_iter().filter_map(Self::convert_stop).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_shape_points(&self) -> Result<Vec<ShapePoint>, ApplicationError> {
        let records = self.client.fetch_shapes().await.map_err(Self::map_err)?;
        Ok(records
            .into_iter()
            .filter_map(Self::convert_shape_point)
            .collect())
    }
}
