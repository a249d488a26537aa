//! Tranzy opendata integration for Busway
//!
//! Authenticated lookups against the [Tranzy](https://tranzy.ai) opendata API
//! for routes, trips, stop times, stops, and shapes. Every call is a fresh
//! round-trip returning the full decoded record set for one category;
//! filtering is the caller's responsibility and nothing is cached.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_tranzy::{TranzyConfig, TranzyOpendataClient, TranzyApi};
//!
//! let config = TranzyConfig {
//!     api_key: "...".to_string(),
//!     agency_id: 8,
//!     ..TranzyConfig::default()
//! };
//! let client = TranzyOpendataClient::new(&config)?;
//! let routes = client.fetch_routes().await?;
//! ```

mod client;
mod config;
mod error;
mod records;

pub use client::{TranzyApi, TranzyOpendataClient};
pub use config::TranzyConfig;
pub use error::TranzyError;
pub use records::{RouteRecord, ShapePointRecord, StopRecord, StopTimeRecord, TripRecord};
