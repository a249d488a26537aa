//! Value objects for the Busway domain

mod geo_point;
mod geometry_source;

pub use geo_point::{GeoPoint, InvalidCoordinates};
pub use geometry_source::GeometrySource;
