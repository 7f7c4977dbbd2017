use crate::core::{geo::Coordinate, place::Route};
use serde::Serialize;

pub const ROUTE_STROKE_WIDTH: f32 = 5.0;

/// Polyline drawn for the active route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverlay {
    pub path: Vec<Coordinate>,
    pub stroke_width: f32,
}

impl RouteOverlay {
    pub fn from_route(route: &Route) -> Self {
        Self {
            path: route.polyline.clone(),
            stroke_width: ROUTE_STROKE_WIDTH,
        }
    }
}
