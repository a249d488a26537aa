//! Geoapify map-matching integration for Busway
//!
//! Snaps a sparse ordered set of stop coordinates onto plausible road
//! geometry via the [Geoapify](https://www.geoapify.com) map-matching API.
//! Used only as a fallback when the agency publishes no shape for a trip.

mod client;
mod config;
mod error;

pub use client::{GeoapifyMatchingClient, MapMatcher};
pub use config::GeoapifyConfig;
pub use error::GeoapifyError;
