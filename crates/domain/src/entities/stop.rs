//! Stop, stop-time, and timed-stop entities

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// A transit stop with its position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    /// Opaque stop identifier
    pub id: String,
    /// Human-readable stop name
    pub name: String,
    /// Stop position
    pub position: GeoPoint,
}

impl Stop {
    /// Create a new stop
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Links a trip to a stop via the sequence ordering key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StopTime {
    /// The trip this entry belongs to
    pub trip_id: String,
    /// The stop visited
    pub stop_id: String,
    /// Position of the stop within the trip (ascending)
    pub sequence: u32,
}

/// A stop plus the estimated travel time to the next stop in sequence
///
/// The final stop of a trip always carries an estimate of zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimedStop {
    /// The stop itself
    pub stop: Stop,
    /// Estimated minutes to the next stop (0 for the last stop)
    pub minutes_to_next: f64,
}
