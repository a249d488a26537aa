//! Application services

mod geometry_service;

pub use geometry_service::{
    partition_waypoints, stitch_segments, ChunkOutcome, RouteGeometryService,
    MAX_WAYPOINTS_PER_CHUNK,
};
