//! # Pinpoint
//!
//! Coordination layer for a map screen: it tracks the user's location,
//! searches for nearby places inside the visible region, requests routes
//! and fetches street-level previews for a selected place.
//!
//! Geocoding, routing, previews and location fixes are delegated to
//! capabilities supplied by the host platform (see [`services`]). The
//! view-models in [`view_model`] own the UI session state and apply the
//! results of those asynchronous requests on a single writer.

pub mod background;
pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod runtime;
pub mod services;
pub mod view_model;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::MapConfig,
    geo::{Coordinate, GeoBounds, Region},
    place::{Place, Route, RoutePath, SceneHandle, TransportType},
};

pub use services::{
    external::HostMapApp,
    location::{AuthorizationState, LocationCapability, LocationEvent, LocationProvider},
    preview::{PreviewCapability, PreviewClient},
    routing::{DirectionsCapability, DirectionsRequest, RouteClient},
    search::{PlaceSearchCapability, PlaceSearchClient, SearchRequest},
};

pub use input::events::UserAction;

pub use layers::{marker::Marker, marker::UserAnnotation, route::RouteOverlay};

pub use view_model::{
    builder::MapScreenBuilder,
    details::{PlaceDetailsViewModel, PreviewState},
    map::{MapPhase, MapState, MapViewModel},
    observer::ListenerId,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, PinpointError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum PinpointError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "http")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Capability error: {0}")]
    Capability(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error type alias for convenience
pub type Error = PinpointError;
