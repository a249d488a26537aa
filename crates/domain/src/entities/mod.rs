//! Transit entities
//!
//! Read-only snapshots of the agency's GTFS-style records, re-fetched for
//! every resolution request.

mod geometry;
mod route;
mod shape;
mod stop;

pub use geometry::RouteGeometry;
pub use route::{Route, Trip};
pub use shape::ShapePoint;
pub use stop::{Stop, StopTime, TimedStop};
