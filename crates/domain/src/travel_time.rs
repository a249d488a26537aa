//! Travel-time estimation over an ordered coordinate sequence
//!
//! Deterministic and pure: great-circle distance per consecutive leg,
//! converted to minutes at a constant average speed.

use crate::value_objects::GeoPoint;

/// Default average bus speed used when the caller does not supply one
pub const DEFAULT_AVG_SPEED_KMH: f64 = 20.0;

/// Estimate minutes of travel for each leg of an ordered point sequence
///
/// Returns one entry per input point. Entry `i` is the estimated time from
/// point `i` to point `i + 1`; the final entry is always 0 since the last
/// point has no next leg. Empty input yields an empty list.
#[must_use]
pub fn estimate_minutes(points: &[GeoPoint], avg_speed_kmh: f64) -> Vec<f64> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut minutes: Vec<f64> = points
        .windows(2)
        .map(|pair| (pair[0].distance_km(&pair[1]) / avg_speed_kmh) * 60.0)
        .collect();
    minutes.push(0.0);
    minutes
}
