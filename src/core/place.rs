use crate::core::geo::{Coordinate, Region};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A point of interest produced by search or selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub coordinate: Coordinate,
    pub address_summary: String,
}

impl Place {
    pub fn new(
        name: impl Into<String>,
        coordinate: Coordinate,
        address_summary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            coordinate,
            address_summary: address_summary.into(),
        }
    }
}

/// How the route should be travelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    #[default]
    Automobile,
    Walking,
}

impl TransportType {
    /// Profile segment used by OSRM-style directions endpoints
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Automobile => "driving",
            Self::Walking => "walking",
        }
    }
}

/// One candidate path returned by a directions capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    pub polyline: Vec<Coordinate>,
    pub distance_meters: f64,
    pub expected_travel_time: Duration,
}

/// A route ready for display: the path, its destination and the camera region that fits it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub polyline: Vec<Coordinate>,
    pub bounding_region: Region,
    pub destination: Place,
    pub distance_meters: f64,
    pub expected_travel_time: Duration,
}

/// Opaque handle to a street-level preview scene
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneHandle {
    pub id: String,
}

impl SceneHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
