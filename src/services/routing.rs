use crate::core::geo::{Coordinate, GeoBounds, Region};
use crate::core::place::{Place, Route, RoutePath, TransportType};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Directions between an origin and a destination place
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Coordinate,
    pub destination: Place,
    pub transport: TransportType,
}

/// Trait representing a directions service. Candidates are ordered best first.
#[async_trait]
pub trait DirectionsCapability: Send + Sync {
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<RoutePath>>;
}

#[derive(Clone)]
pub struct RouteClient {
    capability: Arc<dyn DirectionsCapability>,
    transport: TransportType,
    inset_ratio: f64,
}

impl RouteClient {
    pub fn new(
        capability: Arc<dyn DirectionsCapability>,
        transport: TransportType,
        inset_ratio: f64,
    ) -> Self {
        Self {
            capability,
            transport,
            inset_ratio,
        }
    }

    pub fn transport(&self) -> TransportType {
        self.transport
    }

    /// Route from `from` to `to` using the first candidate path.
    ///
    /// Returns `None` when no path is found or the request fails.
    pub async fn route(&self, from: Coordinate, to: &Place) -> Option<Route> {
        let request = DirectionsRequest {
            origin: from,
            destination: to.clone(),
            transport: self.transport,
        };

        let paths = match self.capability.directions(&request).await {
            Ok(paths) => paths,
            Err(e) => {
                log::warn!("directions to {:?} failed: {}", to.name, e);
                return None;
            }
        };

        let Some(path) = paths.into_iter().next() else {
            log::warn!("no route found to {:?}", to.name);
            return None;
        };

        let Some(bounding_region) = fit_region(&path.polyline, self.inset_ratio) else {
            log::warn!("route to {:?} has an empty polyline", to.name);
            return None;
        };

        Some(Route {
            polyline: path.polyline,
            bounding_region,
            destination: to.clone(),
            distance_meters: path.distance_meters,
            expected_travel_time: path.expected_travel_time,
        })
    }
}

/// Camera region showing the whole path with `inset_ratio` margin on every side
pub fn fit_region(polyline: &[Coordinate], inset_ratio: f64) -> Option<Region> {
    GeoBounds::from_path(polyline).map(|bounds| bounds.expand_by_ratio(inset_ratio).to_region())
}
