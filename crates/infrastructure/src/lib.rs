//! Infrastructure layer for Busway
//!
//! Configuration loading, tracing setup, and the adapters that implement
//! the application ports on top of the integration crates.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::{GeoapifyAdapter, TranzyAdapter};
pub use config::{AppConfig, ConfigError};
pub use telemetry::init_tracing;
