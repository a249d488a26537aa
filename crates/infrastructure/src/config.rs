//! Application configuration
//!
//! Loaded once at startup from an optional `busway.toml` plus environment
//! overrides with the `BUSWAY_` prefix (nested keys use a double
//! underscore, e.g. `BUSWAY_TRANZY__API_KEY`). API keys live in
//! [`SecretString`] and are exposed only while building the HTTP clients.

use std::path::Path;

use domain::travel_time::DEFAULT_AVG_SPEED_KMH;
use integration_geoapify::GeoapifyConfig;
use integration_tranzy::TranzyConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file or environment could not be read or parsed
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A required credential is absent or empty
    #[error("Missing credential: {0} (set it in busway.toml or the environment)")]
    MissingCredential(&'static str),

    /// A present value fails validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Transit opendata API section
    #[serde(default)]
    pub tranzy: TranzyAppConfig,

    /// Map-matching API section
    #[serde(default)]
    pub geoapify: GeoapifyAppConfig,

    /// Travel-time estimation section
    #[serde(default)]
    pub estimation: EstimationAppConfig,
}

impl AppConfig {
    /// Load configuration from an optional file plus environment overrides
    ///
    /// With no explicit path, `busway.toml` next to the working directory is
    /// used when present. Environment variables always win over the file.
    ///
    /// # Errors
    ///
    /// Fails when the file or environment cannot be parsed into the
    /// expected shape.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = config::Config::builder();

        let builder = match path {
            Some(p) => builder.add_source(config::File::from(p)),
            None => builder.add_source(config::File::with_name("busway").required(false)),
        };

        let builder = builder.add_source(
            config::Environment::with_prefix("BUSWAY")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Validate both API sections
    ///
    /// # Errors
    ///
    /// Fails on the first missing credential or invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tranzy.to_client_config()?;
        self.geoapify.to_client_config()?;
        if self.estimation.avg_speed_kmh <= 0.0 {
            return Err(ConfigError::Invalid(
                "estimation.avg_speed_kmh must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Transit opendata API configuration
#[derive(Debug, Deserialize)]
pub struct TranzyAppConfig {
    /// Base URL of the opendata API
    #[serde(default = "default_tranzy_base_url")]
    pub base_url: String,

    /// API key (required)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Numeric agency identifier sent with every request
    #[serde(default = "default_agency_id")]
    pub agency_id: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_tranzy_base_url() -> String {
    "https://api.tranzy.ai/v1/opendata".to_string()
}

const fn default_agency_id() -> u32 {
    8
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for TranzyAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_tranzy_base_url(),
            api_key: None,
            agency_id: default_agency_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranzyAppConfig {
    /// Convert to the `integration_tranzy` client configuration
    ///
    /// # Errors
    ///
    /// Fails with `MissingCredential` when no API key is configured.
    pub fn to_client_config(&self) -> Result<TranzyConfig, ConfigError> {
        let api_key = self
            .api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential("tranzy.api_key"))?;

        Ok(TranzyConfig {
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
            agency_id: self.agency_id,
            timeout_secs: self.timeout_secs,
        })
    }
}

/// Map-matching API configuration
#[derive(Debug, Deserialize)]
pub struct GeoapifyAppConfig {
    /// Base URL of the Geoapify API
    #[serde(default = "default_geoapify_base_url")]
    pub base_url: String,

    /// API key (required)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Travel mode for matching
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geoapify_base_url() -> String {
    "https://api.geoapify.com".to_string()
}

fn default_mode() -> String {
    "drive".to_string()
}

impl Default for GeoapifyAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geoapify_base_url(),
            api_key: None,
            mode: default_mode(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeoapifyAppConfig {
    /// Convert to the `integration_geoapify` client configuration
    ///
    /// # Errors
    ///
    /// Fails with `MissingCredential` when no API key is configured.
    pub fn to_client_config(&self) -> Result<GeoapifyConfig, ConfigError> {
        let api_key = self
            .api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential("geoapify.api_key"))?;

        Ok(GeoapifyConfig {
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
            mode: self.mode.clone(),
            timeout_secs: self.timeout_secs,
        })
    }
}

/// Travel-time estimation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EstimationAppConfig {
    /// Assumed constant bus speed in km/h
    #[serde(default = "default_avg_speed_kmh")]
    pub avg_speed_kmh: f64,
}

const fn default_avg_speed_kmh() -> f64 {
    DEFAULT_AVG_SPEED_KMH
}

impl Default for EstimationAppConfig {
    fn default() -> Self {
        Self {
            avg_speed_kmh: default_avg_speed_kmh(),
        }
    }
}
