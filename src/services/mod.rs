//! Wrappers around the platform capabilities the map screen depends on.

pub mod external;
#[cfg(feature = "http")]
pub mod http;
pub mod location;
pub mod preview;
pub mod routing;
pub mod search;

pub use external::HostMapApp;
pub use location::{AuthorizationState, LocationCapability, LocationEvent, LocationProvider};
pub use preview::{PreviewCapability, PreviewClient};
pub use routing::{DirectionsCapability, DirectionsRequest, RouteClient};
pub use search::{PlaceSearchCapability, PlaceSearchClient, SearchRequest};

#[cfg(feature = "http")]
pub use http::{NominatimSearch, OsrmDirections};
