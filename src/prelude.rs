//! Prelude module for common pinpoint types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use pinpoint::prelude::*;`

pub use crate::core::{
    config::{HttpConfig, MapConfig},
    geo::{Coordinate, GeoBounds, Region},
    place::{Place, Route, RoutePath, SceneHandle, TransportType},
};

pub use crate::services::{
    external::HostMapApp,
    location::{AuthorizationState, LocationCapability, LocationEvent, LocationProvider},
    preview::{PreviewCapability, PreviewClient},
    routing::{DirectionsCapability, DirectionsRequest, RouteClient},
    search::{PlaceSearchCapability, PlaceSearchClient, SearchRequest},
};

#[cfg(feature = "http")]
pub use crate::services::http::{NominatimSearch, OsrmDirections};

pub use crate::input::events::{ActionHandled, UserAction};

pub use crate::layers::{Marker, RouteOverlay, UserAnnotation};

pub use crate::view_model::{
    ListenerId, MapPhase, MapScreenBuilder, MapState, MapViewModel, PlaceDetailsViewModel,
    PreviewState,
};

pub use crate::runtime::{init_runtime, runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::{Error as PinpointError, Result};

pub use std::sync::Arc;

pub use async_trait::async_trait;
