//! Shape point entity

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// One point of an agency-published shape polyline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShapePoint {
    /// The shape this point belongs to
    pub shape_id: String,
    /// Point position
    pub position: GeoPoint,
    /// Position of the point within the shape (ascending)
    pub sequence: u32,
}

impl ShapePoint {
    /// Create a new shape point
    #[must_use]
    pub fn new(shape_id: impl Into<String>, position: GeoPoint, sequence: u32) -> Self {
        Self {
            shape_id: shape_id.into(),
            position,
            sequence,
        }
    }
}
