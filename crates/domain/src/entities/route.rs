//! Route and trip entities

use std::fmt;

use serde::{Deserialize, Serialize};

/// A transit route, identified by an opaque id and a human-facing short name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    /// Opaque route identifier
    pub id: String,
    /// Human-facing label (e.g. "E8")
    pub short_name: String,
    /// Longer descriptive name, when the agency publishes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
}

impl Route {
    /// Create a new route
    #[must_use]
    pub fn new(id: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            short_name: short_name.into(),
            long_name: None,
        }
    }

    /// Attach the descriptive long name
    #[must_use]
    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.long_name {
            Some(long) => write!(f, "{} ({long})", self.short_name),
            None => write!(f, "{}", self.short_name),
        }
    }
}

/// A single scheduled run of a route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trip {
    /// Opaque trip identifier
    pub id: String,
    /// The route this trip belongs to
    pub route_id: String,
    /// The agency-published shape for this trip, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_id: Option<String>,
}

impl Trip {
    /// Create a new trip without a shape reference
    #[must_use]
    pub fn new(id: impl Into<String>, route_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            route_id: route_id.into(),
            shape_id: None,
        }
    }

    /// Attach the shape identifier
    #[must_use]
    pub fn with_shape(mut self, shape_id: impl Into<String>) -> Self {
        self.shape_id = Some(shape_id.into());
        self
    }
}
