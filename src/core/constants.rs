//! Screen-wide defaults and UI strings.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

use crate::core::geo::Coordinate;

/// Camera centre used until the first location fix arrives (San Francisco).
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    latitude: 37.7749,
    longitude: -122.4194,
};

/// Latitude and longitude span of the camera around the user, in degrees.
pub const DEFAULT_SPAN: f64 = 0.1;

/// Margin added on each side of a route's bounding box, as a fraction of its size.
pub const ROUTE_INSET_RATIO: f64 = 0.2;

/// Maximum results requested from HTTP search backends.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

pub const USER_AGENT: &str = "pinpoint/0.1";

pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

pub const OSRM_ENDPOINT: &str = "https://router.project-osrm.org/route/v1";

/// Title of the user location annotation.
pub const ANNOTATION_TITLE: &str = "Current Location";
pub const SEARCH_PLACEHOLDER: &str = "Search for a location";
pub const NO_PREVIEW_AVAILABLE: &str = "No preview available";
pub const OPEN_IN_MAPS: &str = "Open in Maps";
pub const GET_DIRECTIONS: &str = "Get Directions";
pub const RECENTER: &str = "Recenter";
pub const RESET: &str = "Reset";
