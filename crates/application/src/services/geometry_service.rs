//! Route geometry resolution
//!
//! Produces exactly one line geometry for a route short name, preferring
//! the agency-published shape, then map-matched stop coordinates, then a
//! straight line through the stops. Every resolution re-fetches its data;
//! nothing is cached across calls.

use std::collections::HashMap;
use std::sync::Arc;

use domain::travel_time::estimate_minutes;
use domain::value_objects::{GeoPoint, GeometrySource};
use domain::{DomainError, Route, RouteGeometry, Stop, TimedStop, Trip};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{MapMatchingPort, TransitDataPort};

/// Maximum waypoints per map-matching request (service limit)
pub const MAX_WAYPOINTS_PER_CHUNK: usize = 100;

/// Result of one map-matching chunk request
///
/// Failures are values, not logs: the resolver aggregates them and only
/// falls back to a straight line when every chunk failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    /// The chunk produced a matched line
    Matched(Vec<GeoPoint>),
    /// The chunk request failed or returned no usable geometry
    Failed {
        /// Position of the chunk in the partition
        index: usize,
        /// Why the chunk produced nothing
        reason: String,
    },
}

/// Partition an ordered waypoint list into consecutive chunks of at most
/// `max_len` points
#[must_use]
pub fn partition_waypoints(waypoints: &[GeoPoint], max_len: usize) -> Vec<Vec<GeoPoint>> {
    waypoints
        .chunks(max_len)
        .map(<[GeoPoint]>::to_vec)
        .collect()
}

/// Stitch matched chunk lines into one sequence
///
/// The first segment is kept in full; every later segment drops its first
/// point, which duplicates the previous segment's last point at the chunk
/// boundary.
#[must_use]
pub fn stitch_segments(segments: Vec<Vec<GeoPoint>>) -> Vec<GeoPoint> {
    let mut merged: Vec<GeoPoint> = Vec::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i == 0 {
            merged.extend(segment);
        } else {
            merged.extend(segment.into_iter().skip(1));
        }
    }
    merged
}

/// Resolves a route short name to one ordered line geometry
pub struct RouteGeometryService {
    transit: Arc<dyn TransitDataPort>,
    matcher: Arc<dyn MapMatchingPort>,
}

impl std::fmt::Debug for RouteGeometryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGeometryService").finish_non_exhaustive()
    }
}

impl RouteGeometryService {
    /// Create a new resolution service over the given ports
    #[must_use]
    pub fn new(transit: Arc<dyn TransitDataPort>, matcher: Arc<dyn MapMatchingPort>) -> Self {
        Self { transit, matcher }
    }

    /// Resolve the route short name to a single geometry
    ///
    /// Tier order is strict: authoritative shape, then (without a usable
    /// shape) the stop-based fallbacks.
    ///
    /// # Errors
    ///
    /// Fails when the short name matches no route, the route has no trip,
    /// the fallback path resolves zero stops, or a required lookup fails.
    #[instrument(skip(self))]
    pub async fn resolve(&self, short_name: &str) -> Result<RouteGeometry, ApplicationError> {
        let (route, trip) = self.lookup_route_and_trip(short_name).await?;
        debug!(route_id = %route.id, trip_id = %trip.id, "Resolved route and trip");

        if let Some(shape_id) = trip.shape_id.as_deref() {
            if let Some(points) = self.shape_points(shape_id).await? {
                info!(shape_id, points = points.len(), "Using authoritative shape");
                return Ok(RouteGeometry::new(points, GeometrySource::AuthoritativeShape));
            }
            warn!(shape_id, "Shape has no points, falling back to stops");
        }

        let stops = self.ordered_stops(&trip).await?;
        Ok(self.fallback_geometry(&stops).await)
    }

    /// Resolve the ordered stop list with travel-time estimates
    ///
    /// Estimates use straight-line distance between consecutive stops at
    /// the given constant speed; the final stop's estimate is zero.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as the fallback tiers of
    /// [`Self::resolve`].
    #[instrument(skip(self))]
    pub async fn resolve_stops(
        &self,
        short_name: &str,
        avg_speed_kmh: f64,
    ) -> Result<Vec<TimedStop>, ApplicationError> {
        let (_route, trip) = self.lookup_route_and_trip(short_name).await?;
        let stops = self.ordered_stops(&trip).await?;

        let positions: Vec<GeoPoint> = stops.iter().map(|s| s.position).collect();
        let minutes = estimate_minutes(&positions, avg_speed_kmh);

        Ok(stops
            .into_iter()
            .zip(minutes)
            .map(|(stop, minutes_to_next)| TimedStop {
                stop,
                minutes_to_next,
            })
            .collect())
    }

    /// Find the route for a short name and the first trip on it
    ///
    /// Lookups are indexed, first-in-collection wins; duplicates are
    /// logged so ambiguous feeds stay observable.
    async fn lookup_route_and_trip(
        &self,
        short_name: &str,
    ) -> Result<(Route, Trip), ApplicationError> {
        let routes = self.transit.fetch_routes().await?;

        let mut by_short_name: HashMap<&str, &Route> = HashMap::new();
        for route in &routes {
            if let Some(existing) = by_short_name.get(route.short_name.as_str()) {
                warn!(
                    short_name = %route.short_name,
                    kept = %existing.id,
                    ignored = %route.id,
                    "Duplicate route short name, keeping first"
                );
            } else {
                by_short_name.insert(route.short_name.as_str(), route);
            }
        }

        let route = by_short_name
            .get(short_name)
            .copied()
            .cloned()
            .ok_or_else(|| DomainError::RouteNotFound(short_name.to_string()))?;

        let trips = self.transit.fetch_trips().await?;

        let mut by_route: HashMap<&str, &Trip> = HashMap::new();
        for trip in &trips {
            if let Some(existing) = by_route.get(trip.route_id.as_str()) {
                warn!(
                    route_id = %trip.route_id,
                    kept = %existing.id,
                    ignored = %trip.id,
                    "Route has multiple trips, keeping first"
                );
            } else {
                by_route.insert(trip.route_id.as_str(), trip);
            }
        }

        let trip = by_route
            .get(route.id.as_str())
            .copied()
            .cloned()
            .ok_or_else(|| DomainError::TripNotFound(route.short_name.clone()))?;

        Ok((route, trip))
    }

    /// Fetch the ordered points of an agency shape
    ///
    /// Returns `None` when the shape id resolves to zero points, which the
    /// resolver treats the same as an absent shape id.
    async fn shape_points(&self, shape_id: &str) -> Result<Option<Vec<GeoPoint>>, ApplicationError> {
        let all_points = self.transit.fetch_shape_points().await?;

        let mut points: Vec<_> = all_points
            .into_iter()
            .filter(|p| p.shape_id == shape_id)
            .collect();

        if points.is_empty() {
            return Ok(None);
        }

        points.sort_by_key(|p| p.sequence);
        Ok(Some(points.into_iter().map(|p| p.position).collect()))
    }

    /// Resolve the stops of a trip in sequence order
    ///
    /// Stop-times whose stop id has no matching stop record are dropped.
    async fn ordered_stops(&self, trip: &Trip) -> Result<Vec<Stop>, ApplicationError> {
        let stop_times = self.transit.fetch_stop_times().await?;

        let mut for_trip: Vec<_> = stop_times
            .into_iter()
            .filter(|st| st.trip_id == trip.id)
            .collect();
        for_trip.sort_by_key(|st| st.sequence);

        let stops = self.transit.fetch_stops().await?;
        let by_id: HashMap<&str, &Stop> = stops.iter().map(|s| (s.id.as_str(), s)).collect();

        let ordered: Vec<Stop> = for_trip
            .iter()
            .filter_map(|st| by_id.get(st.stop_id.as_str()).copied().cloned())
            .collect();

        if ordered.is_empty() {
            return Err(DomainError::NoStops(trip.id.clone()).into());
        }

        debug!(trip_id = %trip.id, stops = ordered.len(), "Resolved ordered stops");
        Ok(ordered)
    }

    /// Build geometry from the ordered stop list (tiers 2 and 3)
    async fn fallback_geometry(&self, stops: &[Stop]) -> RouteGeometry {
        let waypoints: Vec<GeoPoint> = stops.iter().map(|s| s.position).collect();

        if waypoints.len() <= 2 {
            return RouteGeometry::new(waypoints, GeometrySource::StraightLineFallback);
        }

        let chunks = partition_waypoints(&waypoints, MAX_WAYPOINTS_PER_CHUNK);
        info!(
            stops = waypoints.len(),
            chunks = chunks.len(),
            "Map-matching fallback"
        );

        let outcomes = self.match_chunks(&chunks).await;

        let segments: Vec<Vec<GeoPoint>> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                ChunkOutcome::Matched(points) => Some(points),
                ChunkOutcome::Failed { index, reason } => {
                    warn!(chunk = index, %reason, "Map-matching chunk skipped");
                    None
                }
            })
            .collect();

        if segments.is_empty() {
            warn!("Every map-matching chunk failed, using straight line");
            return RouteGeometry::new(waypoints, GeometrySource::StraightLineFallback);
        }

        RouteGeometry::new(stitch_segments(segments), GeometrySource::MatchedPath)
    }

    /// Request every chunk in order, recording each result as a value
    ///
    /// Chunk requests run sequentially; one failing chunk never aborts its
    /// siblings.
    async fn match_chunks(&self, chunks: &[Vec<GeoPoint>]) -> Vec<ChunkOutcome> {
        let mut outcomes = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            match self.matcher.match_waypoints(chunk).await {
                Ok(points) if points.is_empty() => outcomes.push(ChunkOutcome::Failed {
                    index,
                    reason: "empty geometry".to_string(),
                }),
                Ok(points) => outcomes.push(ChunkOutcome::Matched(points)),
                Err(e) => outcomes.push(ChunkOutcome::Failed {
                    index,
                    reason: e.to_string(),
                }),
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use domain::{ShapePoint, StopTime};
    use mockall::predicate;

    use super::*;
    use crate::ports::{MockMapMatchingPort, MockTransitDataPort};

    fn point(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint::new_unchecked(lon, lat)
    }

    fn sample_routes() -> Vec<Route> {
        vec![
            Route::new("40", "E8").with_long_name("Gara de Nord - UMT"),
            Route::new("41", "33"),
        ]
    }

    fn trip_with_shape() -> Trip {
        Trip::new("40_0", "40").with_shape("40_0_shp")
    }

    fn trip_without_shape() -> Trip {
        Trip::new("40_0", "40")
    }

    fn stop_times_for(trip_id: &str, stop_ids: &[&str]) -> Vec<StopTime> {
        stop_ids
            .iter()
            .enumerate()
            .map(|(i, stop_id)| StopTime {
                trip_id: trip_id.to_string(),
                stop_id: (*stop_id).to_string(),
                sequence: u32::try_from(i).unwrap() + 1,
            })
            .collect()
    }

    fn numbered_stops(count: usize) -> Vec<Stop> {
        (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let lon = 21.0 + (i as f64) * 0.001;
                Stop::new(format!("s{i}"), format!("Stop {i}"), point(lon, 45.76))
            })
            .collect()
    }

    fn service(
        transit: MockTransitDataPort,
        matcher: MockMapMatchingPort,
    ) -> RouteGeometryService {
        RouteGeometryService::new(Arc::new(transit), Arc::new(matcher))
    }

    // ------------------------------------------------------------------
    // Tier 1: authoritative shape
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn shape_wins_and_no_fallback_calls_happen() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .times(1)
            .returning(|| Ok(sample_routes()));
        transit
            .expect_fetch_trips()
            .times(1)
            .returning(|| Ok(vec![trip_with_shape()]));
        transit.expect_fetch_shape_points().times(1).returning(|| {
            Ok(vec![
                ShapePoint::new("40_0_shp", point(21.22, 45.77), 3),
                ShapePoint::new("other_shp", point(0.0, 0.0), 1),
                ShapePoint::new("40_0_shp", point(21.20, 45.76), 1),
                ShapePoint::new("40_0_shp", point(21.21, 45.765), 2),
            ])
        });
        // No stop_times/stops/matcher expectations: calling them would panic.
        let matcher = MockMapMatchingPort::new();

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();

        assert_eq!(geometry.source, GeometrySource::AuthoritativeShape);
        assert_eq!(
            geometry.points,
            vec![
                point(21.20, 45.76),
                point(21.21, 45.765),
                point(21.22, 45.77)
            ]
        );
    }

    #[tokio::test]
    async fn empty_shape_is_treated_as_absent() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .returning(|| Ok(sample_routes()));
        transit
            .expect_fetch_trips()
            .returning(|| Ok(vec![trip_with_shape()]));
        transit
            .expect_fetch_shape_points()
            .returning(|| Ok(vec![ShapePoint::new("other_shp", point(0.0, 0.0), 1)]));
        transit
            .expect_fetch_stop_times()
            .returning(|| Ok(stop_times_for("40_0", &["s0", "s1"])));
        transit
            .expect_fetch_stops()
            .returning(|| Ok(numbered_stops(2)));
        let matcher = MockMapMatchingPort::new();

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();
        assert_eq!(geometry.source, GeometrySource::StraightLineFallback);
        assert_eq!(geometry.len(), 2);
    }

    // ------------------------------------------------------------------
    // Tier 2: direct fallback
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn two_stops_build_a_straight_line() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .returning(|| Ok(sample_routes()));
        transit
            .expect_fetch_trips()
            .returning(|| Ok(vec![trip_without_shape()]));
        transit
            .expect_fetch_stop_times()
            .returning(|| Ok(stop_times_for("40_0", &["a", "b"])));
        transit.expect_fetch_stops().returning(|| {
            Ok(vec![
                Stop::new("a", "First", point(21.20, 45.76)),
                Stop::new("b", "Second", point(21.21, 45.76)),
            ])
        });
        let matcher = MockMapMatchingPort::new();

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();

        assert_eq!(geometry.source, GeometrySource::StraightLineFallback);
        assert_eq!(
            geometry.points,
            vec![point(21.20, 45.76), point(21.21, 45.76)]
        );
    }

    #[tokio::test]
    async fn stop_order_follows_sequence_not_collection_order() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .returning(|| Ok(sample_routes()));
        transit
            .expect_fetch_trips()
            .returning(|| Ok(vec![trip_without_shape()]));
        transit.expect_fetch_stop_times().returning(|| {
            Ok(vec![
                StopTime {
                    trip_id: "40_0".to_string(),
                    stop_id: "b".to_string(),
                    sequence: 2,
                },
                StopTime {
                    trip_id: "other".to_string(),
                    stop_id: "x".to_string(),
                    sequence: 1,
                },
                StopTime {
                    trip_id: "40_0".to_string(),
                    stop_id: "a".to_string(),
                    sequence: 1,
                },
            ])
        });
        transit.expect_fetch_stops().returning(|| {
            Ok(vec![
                Stop::new("b", "Second", point(21.21, 45.76)),
                Stop::new("a", "First", point(21.20, 45.76)),
            ])
        });
        let matcher = MockMapMatchingPort::new();

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();
        assert_eq!(
            geometry.points,
            vec![point(21.20, 45.76), point(21.21, 45.76)]
        );
    }

    #[tokio::test]
    async fn unmatched_stop_ids_are_dropped() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .returning(|| Ok(sample_routes()));
        transit
            .expect_fetch_trips()
            .returning(|| Ok(vec![trip_without_shape()]));
        transit
            .expect_fetch_stop_times()
            .returning(|| Ok(stop_times_for("40_0", &["a", "ghost", "b"])));
        transit.expect_fetch_stops().returning(|| {
            Ok(vec![
                Stop::new("a", "First", point(21.20, 45.76)),
                Stop::new("b", "Second", point(21.21, 45.76)),
            ])
        });
        let matcher = MockMapMatchingPort::new();

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();
        assert_eq!(geometry.len(), 2);
    }

    #[tokio::test]
    async fn zero_stops_fail_with_no_stops() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .returning(|| Ok(sample_routes()));
        transit
            .expect_fetch_trips()
            .returning(|| Ok(vec![trip_without_shape()]));
        transit
            .expect_fetch_stop_times()
            .returning(|| Ok(Vec::new()));
        transit.expect_fetch_stops().returning(|| Ok(Vec::new()));
        let matcher = MockMapMatchingPort::new();

        let result = service(transit, matcher).resolve("E8").await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::NoStops(_)))
        ));
    }

    // ------------------------------------------------------------------
    // Tier 3: map-matching fallback
    // ------------------------------------------------------------------

    fn transit_with_n_stops(n: usize) -> MockTransitDataPort {
        let stops = numbered_stops(n);
        let stop_ids: Vec<String> = stops.iter().map(|s| s.id.clone()).collect();
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .returning(|| Ok(sample_routes()));
        transit
            .expect_fetch_trips()
            .returning(|| Ok(vec![trip_without_shape()]));
        transit.expect_fetch_stop_times().returning(move || {
            let ids: Vec<&str> = stop_ids.iter().map(String::as_str).collect();
            Ok(stop_times_for("40_0", &ids))
        });
        transit
            .expect_fetch_stops()
            .returning(move || Ok(stops.clone()));
        transit
    }

    #[tokio::test]
    async fn all_chunks_failing_falls_back_to_full_straight_line() {
        let transit = transit_with_n_stops(5);
        let mut matcher = MockMapMatchingPort::new();
        matcher
            .expect_match_waypoints()
            .times(1)
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 502".to_string())));

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();

        assert_eq!(geometry.source, GeometrySource::StraightLineFallback);
        assert_eq!(geometry.len(), 5);
    }

    #[tokio::test]
    async fn matched_chunks_produce_matched_path() {
        let transit = transit_with_n_stops(5);
        let mut matcher = MockMapMatchingPort::new();
        matcher
            .expect_match_waypoints()
            .with(predicate::function(|wp: &[GeoPoint]| wp.len() == 5))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    point(21.0, 45.76),
                    point(21.0015, 45.7605),
                    point(21.004, 45.76),
                ])
            });

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();

        assert_eq!(geometry.source, GeometrySource::MatchedPath);
        assert_eq!(geometry.len(), 3);
    }

    #[tokio::test]
    async fn chunk_of_250_stops_splits_100_100_50_and_skips_failed_chunk() {
        let transit = transit_with_n_stops(250);
        let mut matcher = MockMapMatchingPort::new();
        // Chunk sizes are 100, 100, 50; the middle chunk fails.
        matcher
            .expect_match_waypoints()
            .times(3)
            .returning(|waypoints| match waypoints.len() {
                100 if waypoints[0] == point(21.0, 45.76) => {
                    Ok(vec![point(1.0, 1.0), point(2.0, 2.0), point(3.0, 3.0)])
                }
                100 => Err(ApplicationError::ExternalService("HTTP 429".to_string())),
                50 => Ok(vec![point(3.0, 3.0), point(4.0, 4.0), point(5.0, 5.0)]),
                n => panic!("unexpected chunk size {n}"),
            });

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();

        // chunk1 in full, chunk3 minus its first point
        assert_eq!(geometry.source, GeometrySource::MatchedPath);
        assert_eq!(
            geometry.points,
            vec![
                point(1.0, 1.0),
                point(2.0, 2.0),
                point(3.0, 3.0),
                point(4.0, 4.0),
                point(5.0, 5.0)
            ]
        );
    }

    #[tokio::test]
    async fn stitched_length_is_sum_minus_chunk_seams() {
        let transit = transit_with_n_stops(250);
        let mut matcher = MockMapMatchingPort::new();
        matcher
            .expect_match_waypoints()
            .times(3)
            .returning(|waypoints| {
                // Echo the waypoints back as the matched line
                Ok(waypoints.to_vec())
            });

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();

        assert_eq!(geometry.source, GeometrySource::MatchedPath);
        assert_eq!(geometry.len(), 100 + 100 + 50 - 2);

        // No consecutive duplicates at the seams
        for pair in geometry.points.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[tokio::test]
    async fn empty_chunk_geometry_counts_as_failure() {
        let transit = transit_with_n_stops(5);
        let mut matcher = MockMapMatchingPort::new();
        matcher
            .expect_match_waypoints()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();
        assert_eq!(geometry.source, GeometrySource::StraightLineFallback);
    }

    // ------------------------------------------------------------------
    // Lookup semantics
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn unknown_short_name_fails_before_further_calls() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .times(1)
            .returning(|| Ok(sample_routes()));
        // fetch_trips has no expectation: a call would panic the test.
        let matcher = MockMapMatchingPort::new();

        let result = service(transit, matcher).resolve("99").await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::RouteNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn route_without_trip_fails_with_trip_not_found() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .returning(|| Ok(sample_routes()));
        transit
            .expect_fetch_trips()
            .returning(|| Ok(vec![Trip::new("41_0", "41")]));
        let matcher = MockMapMatchingPort::new();

        let result = service(transit, matcher).resolve("E8").await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::TripNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn duplicate_short_names_keep_first_route() {
        let mut transit = MockTransitDataPort::new();
        transit.expect_fetch_routes().returning(|| {
            Ok(vec![
                Route::new("40", "E8"),
                Route::new("77", "E8"), // duplicate label, ignored
            ])
        });
        transit.expect_fetch_trips().returning(|| {
            Ok(vec![
                Trip::new("77_0", "77").with_shape("77_shp"),
                Trip::new("40_0", "40").with_shape("40_0_shp"),
            ])
        });
        transit.expect_fetch_shape_points().returning(|| {
            Ok(vec![
                ShapePoint::new("40_0_shp", point(21.20, 45.76), 1),
                ShapePoint::new("40_0_shp", point(21.21, 45.76), 2),
            ])
        });
        let matcher = MockMapMatchingPort::new();

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();
        // Geometry comes from route "40"'s trip, not route "77"'s
        assert_eq!(geometry.points[0], point(21.20, 45.76));
    }

    #[tokio::test]
    async fn multiple_trips_on_a_route_keep_first_trip() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .returning(|| Ok(sample_routes()));
        transit.expect_fetch_trips().returning(|| {
            Ok(vec![
                Trip::new("40_0", "40").with_shape("40_0_shp"),
                Trip::new("40_1", "40").with_shape("40_1_shp"), // later trip, ignored
            ])
        });
        transit.expect_fetch_shape_points().returning(|| {
            Ok(vec![
                ShapePoint::new("40_0_shp", point(21.20, 45.76), 1),
                ShapePoint::new("40_0_shp", point(21.21, 45.76), 2),
                ShapePoint::new("40_1_shp", point(21.30, 45.80), 1),
                ShapePoint::new("40_1_shp", point(21.31, 45.80), 2),
            ])
        });
        let matcher = MockMapMatchingPort::new();

        let geometry = service(transit, matcher).resolve("E8").await.unwrap();
        // Geometry comes from trip "40_0"'s shape, not trip "40_1"'s
        assert_eq!(
            geometry.points,
            vec![point(21.20, 45.76), point(21.21, 45.76)]
        );
    }

    #[tokio::test]
    async fn transport_error_propagates() {
        let mut transit = MockTransitDataPort::new();
        transit
            .expect_fetch_routes()
            .returning(|| Err(ApplicationError::ExternalService("HTTP 500".to_string())));
        let matcher = MockMapMatchingPort::new();

        let result = service(transit, matcher).resolve("E8").await;
        assert!(matches!(result, Err(ApplicationError::ExternalService(_))));
    }

    // ------------------------------------------------------------------
    // Stop timings
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn resolve_stops_estimates_and_last_is_zero() {
        let transit = transit_with_n_stops(4);
        let matcher = MockMapMatchingPort::new();

        let timed = service(transit, matcher)
            .resolve_stops("E8", 20.0)
            .await
            .unwrap();

        assert_eq!(timed.len(), 4);
        assert_eq!(timed[3].minutes_to_next, 0.0);
        assert!(timed[..3].iter().all(|t| t.minutes_to_next > 0.0));
        assert_eq!(timed[0].stop.name, "Stop 0");
    }

    // ------------------------------------------------------------------
    // Pure helpers
    // ------------------------------------------------------------------

    #[test]
    fn partition_splits_into_bounded_chunks() {
        let waypoints: Vec<GeoPoint> = (0..250)
            .map(|i| point(21.0 + f64::from(i) * 0.0001, 45.76))
            .collect();
        let chunks = partition_waypoints(&waypoints, MAX_WAYPOINTS_PER_CHUNK);
        let lens: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![100, 100, 50]);
    }

    #[test]
    fn partition_of_short_list_is_one_chunk() {
        let waypoints = vec![point(21.0, 45.0), point(21.1, 45.1)];
        let chunks = partition_waypoints(&waypoints, MAX_WAYPOINTS_PER_CHUNK);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 2);
    }

    #[test]
    fn stitch_drops_seam_duplicates() {
        let segments = vec![
            vec![point(1.0, 1.0), point(2.0, 2.0)],
            vec![point(2.0, 2.0), point(3.0, 3.0)],
            vec![point(3.0, 3.0), point(4.0, 4.0)],
        ];
        let merged = stitch_segments(segments);
        assert_eq!(
            merged,
            vec![
                point(1.0, 1.0),
                point(2.0, 2.0),
                point(3.0, 3.0),
                point(4.0, 4.0)
            ]
        );
    }

    #[test]
    fn stitch_of_single_segment_is_identity() {
        let segments = vec![vec![point(1.0, 1.0), point(2.0, 2.0)]];
        assert_eq!(
            stitch_segments(segments),
            vec![point(1.0, 1.0), point(2.0, 2.0)]
        );
    }

    #[test]
    fn stitch_of_nothing_is_empty() {
        assert!(stitch_segments(Vec::new()).is_empty());
    }
}
