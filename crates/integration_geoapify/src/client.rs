//! Geoapify map-matching client
//!
//! Sends one GET per waypoint batch and reads the matched line from
//! `features[0].geometry.coordinates` of the GeoJSON-like response.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoPoint;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GeoapifyConfig;
use crate::error::GeoapifyError;

/// Trait for map-matching clients
#[async_trait]
pub trait MapMatcher: Send + Sync {
    /// Snap an ordered waypoint sequence onto road geometry
    ///
    /// The returned points follow the order of the input waypoints.
    async fn match_waypoints(&self, waypoints: &[GeoPoint]) -> Result<Vec<GeoPoint>, GeoapifyError>;
}

/// Reqwest-based client for the Geoapify map-matching API
#[derive(Debug)]
pub struct GeoapifyMatchingClient {
    client: Client,
    config: GeoapifyConfig,
}

impl GeoapifyMatchingClient {
    /// Create a new map-matching client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &GeoapifyConfig) -> Result<Self, GeoapifyError> {
        config.validate().map_err(GeoapifyError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Busway/0.2")
            .build()
            .map_err(|e| GeoapifyError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Join waypoints into the semicolon-separated `lon,lat` query value
    fn coordinates_param(waypoints: &[GeoPoint]) -> String {
        waypoints
            .iter()
            .map(GeoPoint::to_lon_lat_string)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Extract the matched line from the raw response
    fn parse_match_response(body: &str) -> Result<Vec<GeoPoint>, GeoapifyError> {
        let raw: RawMatchResponse =
            serde_json::from_str(body).map_err(|e| GeoapifyError::ParseError(e.to_string()))?;

        let coordinates = raw
            .features
            .into_iter()
            .next()
            .map(|f| f.geometry.coordinates)
            .ok_or(GeoapifyError::EmptyGeometry)?;

        if coordinates.is_empty() {
            return Err(GeoapifyError::EmptyGeometry);
        }

        coordinates
            .into_iter()
            .map(|[lon, lat]| {
                GeoPoint::new(lon, lat).map_err(|e| GeoapifyError::ParseError(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl MapMatcher for GeoapifyMatchingClient {
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    async fn match_waypoints(&self, waypoints: &[GeoPoint]) -> Result<Vec<GeoPoint>, GeoapifyError> {
        if waypoints.len() < 2 {
            return Err(GeoapifyError::TooFewWaypoints(waypoints.len()));
        }

        let url = format!("{}/v1/map-matching", self.config.base_url);
        let params = [
            ("coordinates", Self::coordinates_param(waypoints)),
            ("mode", self.config.mode.clone()),
            ("apiKey", self.config.api_key.clone()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeoapifyError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GeoapifyError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoapifyError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeoapifyError::ParseError(e.to_string()))?;

        let points = Self::parse_match_response(&body)?;
        debug!(matched = points.len(), "Map-matching succeeded");
        Ok(points)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawMatchResponse {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}
