//! Wire records of the opendata API
//!
//! Field names follow the GTFS-style schema the API publishes. Records are
//! returned unfiltered; callers narrow them to the route or trip they need.

use serde::{Deserialize, Serialize};

/// One route record from the `routes` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteRecord {
    /// Opaque route identifier
    pub route_id: i64,
    /// Human-facing route label (e.g. "E8")
    pub route_short_name: String,
    /// Longer descriptive name
    #[serde(default)]
    pub route_long_name: Option<String>,
}

/// One trip record from the `trips` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripRecord {
    /// Opaque trip identifier
    pub trip_id: String,
    /// The route this trip belongs to
    pub route_id: i64,
    /// Agency-published shape reference, absent for some trips
    #[serde(default)]
    pub shape_id: Option<String>,
}

/// One stop-time record from the `stop_times` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopTimeRecord {
    /// The trip this entry belongs to
    pub trip_id: String,
    /// The stop visited
    pub stop_id: i64,
    /// Ordering key within the trip
    pub stop_sequence: u32,
}

/// One stop record from the `stops` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopRecord {
    /// Opaque stop identifier
    pub stop_id: i64,
    /// Human-readable stop name
    pub stop_name: String,
    /// Stop latitude in degrees
    pub stop_lat: f64,
    /// Stop longitude in degrees
    pub stop_lon: f64,
}

/// One shape-point record from the `shapes` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShapePointRecord {
    /// The shape this point belongs to
    pub shape_id: String,
    /// Point latitude in degrees
    pub shape_pt_lat: f64,
    /// Point longitude in degrees
    pub shape_pt_lon: f64,
    /// Ordering key within the shape
    pub shape_pt_sequence: u32,
}
