//! Tranzy opendata client
//!
//! One GET per endpoint category, authenticated with the `X-API-KEY` and
//! `X-Agency-Id` headers. Each call returns the full record collection for
//! that category; there is no filtering, pagination, retry, or caching at
//! this layer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::TranzyConfig;
use crate::error::TranzyError;
use crate::records::{RouteRecord, ShapePointRecord, StopRecord, StopTimeRecord, TripRecord};

/// Trait for opendata API clients
#[async_trait]
pub trait TranzyApi: Send + Sync {
    /// Fetch all route records for the configured agency
    async fn fetch_routes(&self) -> Result<Vec<RouteRecord>, TranzyError>;

    /// Fetch all trip records for the configured agency
    async fn fetch_trips(&self) -> Result<Vec<TripRecord>, TranzyError>;

    /// Fetch all stop-time records for the configured agency
    async fn fetch_stop_times(&self) -> Result<Vec<StopTimeRecord>, TranzyError>;

    /// Fetch all stop records for the configured agency
    async fn fetch_stops(&self) -> Result<Vec<StopRecord>, TranzyError>;

    /// Fetch all shape-point records for the configured agency
    async fn fetch_shapes(&self) -> Result<Vec<ShapePointRecord>, TranzyError>;
}

/// Reqwest-based client for the Tranzy opendata API
#[derive(Debug)]
pub struct TranzyOpendataClient {
    client: Client,
    config: TranzyConfig,
}

impl TranzyOpendataClient {
    /// Create a new opendata client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &TranzyConfig) -> Result<Self, TranzyError> {
        config.validate().map_err(TranzyError::Configuration)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-API-KEY",
            HeaderValue::from_str(&config.api_key)
                .map_err(|e| TranzyError::Configuration(e.to_string()))?,
        );
        headers.insert(
            "X-Agency-Id",
            HeaderValue::from_str(&config.agency_id.to_string())
                .map_err(|e| TranzyError::Configuration(e.to_string()))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .user_agent("Busway/0.2")
            .build()
            .map_err(|e| TranzyError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Fetch and decode the full record collection at `path`
    async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, TranzyError> {
        let url = format!("{}/{path}", self.config.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                TranzyError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                TranzyError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranzyError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TranzyError::ParseError(e.to_string()))?;

        let records: Vec<T> =
            serde_json::from_str(&body).map_err(|e| TranzyError::ParseError(e.to_string()))?;

        debug!(%url, count = records.len(), "Fetched opendata collection");
        Ok(records)
    }
}

#[async_trait]
impl TranzyApi for TranzyOpendataClient {
    #[instrument(skip(self))]
    async fn fetch_routes(&self) -> Result<Vec<RouteRecord>, TranzyError> {
        self.get_collection("routes").await
    }

    #[instrument(skip(self))]
    async fn fetch_trips(&self) -> Result<Vec<TripRecord>, TranzyError> {
        self.get_collection("trips").await
    }

    #[instrument(skip(self))]
    async fn fetch_stop_times(&self) -> Result<Vec<StopTimeRecord>, TranzyError> {
        self.get_collection("stop_times").await
    }

    #[instrument(skip(self))]
    async fn fetch_stops(&self) -> Result<Vec<StopRecord>, TranzyError> {
        self.get_collection("stops").await
    }

    #[instrument(skip(self))]
    async fn fetch_shapes(&self) -> Result<Vec<ShapePointRecord>, TranzyError> {
        self.get_collection("shapes").await
    }
}
