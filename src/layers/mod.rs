//! Render model for the map: what the view should draw on top of the base map.

pub mod marker;
pub mod route;

pub use marker::{Marker, UserAnnotation};
pub use route::RouteOverlay;
