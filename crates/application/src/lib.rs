//! Application layer for Busway
//!
//! Defines the ports to the transit-data and map-matching services and the
//! route-geometry resolution service that orchestrates them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::RouteGeometryService;
