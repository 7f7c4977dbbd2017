pub mod config;
pub mod constants;
pub mod geo;
pub mod place;

pub use config::{HttpConfig, MapConfig};
pub use geo::{Coordinate, GeoBounds, Region};
pub use place::{Place, Route, RoutePath, SceneHandle, TransportType};
