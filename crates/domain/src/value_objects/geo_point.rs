//! Geographic point value object
//!
//! Stored and serialised as `(longitude, latitude)`, matching the GeoJSON
//! axis order, regardless of the field order on any wire format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A geographic point as a longitude/latitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees (-180 to 180)
    lon: f64,
    /// Latitude in degrees (-90 to 90)
    lat: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: longitude must be -180 to 180, latitude must be -90 to 90"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if longitude is not in [-180, 180]
    /// or latitude is not in [-90, 90]
    pub fn new(lon: f64, lat: f64) -> Result<Self, InvalidCoordinates> {
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates);
        }
        Ok(Self { lon, lat })
    }

    /// Create a point without validation (for trusted sources)
    ///
    /// Caller must ensure longitude is in [-180, 180] and latitude in [-90, 90]
    #[must_use]
    pub const fn new_unchecked(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Get the longitude
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Get the latitude
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Calculate the great-circle distance to another point in kilometers
    ///
    /// Uses the Haversine formula with a mean Earth radius of 6371 km
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Format as the `lon,lat` pair the map-matching API expects
    #[must_use]
    pub fn to_lon_lat_string(&self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lon, self.lat)
    }
}
