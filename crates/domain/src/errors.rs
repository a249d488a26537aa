//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// No route carries the requested short name
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// A route exists but has no trip
    #[error("No trip found for route: {0}")]
    TripNotFound(String),

    /// A trip resolved to zero usable stops
    #[error("No stops found for trip: {0}")]
    NoStops(String),

    /// Coordinate outside the valid latitude/longitude range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}
