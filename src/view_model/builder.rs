//! Builder for wiring a [`MapViewModel`] to its capabilities

use crate::{
    core::config::MapConfig,
    services::{
        external::HostMapApp,
        preview::{PreviewCapability, PreviewClient},
        routing::{DirectionsCapability, RouteClient},
        search::{PlaceSearchCapability, PlaceSearchClient},
    },
    view_model::{details::PlaceDetailsViewModel, map::MapViewModel},
    PinpointError, Result,
};
use std::sync::Arc;

#[derive(Default)]
pub struct MapScreenBuilder {
    config: MapConfig,
    search: Option<Arc<dyn PlaceSearchCapability>>,
    directions: Option<Arc<dyn DirectionsCapability>>,
    preview: Option<Arc<dyn PreviewCapability>>,
    host_app: Option<Arc<dyn HostMapApp>>,
}

impl MapScreenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: MapConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_search(mut self, search: Arc<dyn PlaceSearchCapability>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_directions(mut self, directions: Arc<dyn DirectionsCapability>) -> Self {
        self.directions = Some(directions);
        self
    }

    pub fn with_preview(mut self, preview: Arc<dyn PreviewCapability>) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Optional: without a host app "Open in Maps" is ignored
    pub fn with_host_app(mut self, host_app: Arc<dyn HostMapApp>) -> Self {
        self.host_app = Some(host_app);
        self
    }

    /// Validate the configuration and build the view-model
    pub fn build(self) -> Result<MapViewModel> {
        self.config.validate()?;

        let search = self
            .search
            .ok_or_else(|| PinpointError::InvalidConfig("no place search capability".into()))?;
        let directions = self
            .directions
            .ok_or_else(|| PinpointError::InvalidConfig("no directions capability".into()))?;
        let preview = self
            .preview
            .ok_or_else(|| PinpointError::InvalidConfig("no preview capability".into()))?;

        let route_client = RouteClient::new(
            directions,
            self.config.transport,
            self.config.route_inset_ratio,
        );
        let details = PlaceDetailsViewModel::new(PreviewClient::new(preview), self.host_app);

        Ok(MapViewModel::new(
            self.config,
            PlaceSearchClient::new(search),
            route_client,
            details,
        ))
    }
}
