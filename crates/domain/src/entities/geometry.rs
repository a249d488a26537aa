//! Resolved route geometry

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::value_objects::{GeoPoint, GeometrySource};

/// An ordered line geometry for one route, with its provenance tag
///
/// Always holds at least one point; construction from an empty sequence is
/// the caller's error (the resolver fails with `NoStops` before this).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteGeometry {
    /// Ordered `(lon, lat)` points of the line
    pub points: Vec<GeoPoint>,
    /// Which resolution tier produced the points
    pub source: GeometrySource,
}

impl RouteGeometry {
    /// Create a new geometry
    #[must_use]
    pub fn new(points: Vec<GeoPoint>, source: GeometrySource) -> Self {
        Self { points, source }
    }

    /// Number of points in the line
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the geometry holds no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Render as a GeoJSON `Feature` with a `LineString` geometry
    ///
    /// Coordinates are `[lon, lat]` pairs; `properties.source` carries the
    /// provenance tag and `properties.name` the route label.
    #[must_use]
    pub fn to_geojson(&self, name: &str) -> Value {
        let coordinates: Vec<Value> = self
            .points
            .iter()
            .map(|p| json!([p.lon(), p.lat()]))
            .collect();

        json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
            "properties": {
                "name": name,
                "source": self.source.as_str(),
            },
        })
    }
}
