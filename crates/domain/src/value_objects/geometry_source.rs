//! Provenance tag for resolved route geometries

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the three resolution tiers produced a route geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeometrySource {
    /// Agency-published GTFS shape, taken verbatim
    AuthoritativeShape,
    /// Stop coordinates snapped to roads by the map-matching service
    MatchedPath,
    /// Straight lines between consecutive stops
    StraightLineFallback,
}

impl GeometrySource {
    /// The provenance tag as it appears in GeoJSON `properties.source`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthoritativeShape => "authoritative-shape",
            Self::MatchedPath => "matched-path",
            Self::StraightLineFallback => "straight-line-fallback",
        }
    }
}

impl fmt::Display for GeometrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
