//! Tranzy opendata service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Tranzy opendata API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranzyConfig {
    /// Base URL for the opendata API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `X-API-KEY` on every request
    #[serde(default)]
    pub api_key: String,

    /// Agency identifier sent as `X-Agency-Id` on every request
    #[serde(default = "default_agency_id")]
    pub agency_id: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.tranzy.ai/v1/opendata".to_string()
}

const fn default_agency_id() -> u32 {
    8
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for TranzyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            agency_id: default_agency_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranzyConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.api_key.is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
