//! Configuration for the map screen
//!
//! Defaults reproduce the stock behaviour (San Francisco fallback centre,
//! 0.1 degree span, 20% route inset, driving directions). A configuration
//! can also be loaded from JSON, in which case every field is optional and
//! missing ones keep their default.

use crate::core::constants::{
    DEFAULT_CENTER, DEFAULT_SEARCH_LIMIT, DEFAULT_SPAN, NOMINATIM_ENDPOINT, OSRM_ENDPOINT,
    ROUTE_INSET_RATIO, USER_AGENT,
};
use crate::core::geo::{Coordinate, Region};
use crate::core::place::TransportType;
use crate::{PinpointError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Camera centre used while no location fix has been received
    pub default_center: Coordinate,
    /// Span in degrees of the camera region around the user or default centre
    pub default_span: f64,
    /// Fraction of the route's width/height added on each side when fitting the camera
    pub route_inset_ratio: f64,
    pub transport: TransportType,
    pub http: HttpConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_span: DEFAULT_SPAN,
            route_inset_ratio: ROUTE_INSET_RATIO,
            transport: TransportType::default(),
            http: HttpConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.default_center.is_valid() {
            return Err(PinpointError::InvalidCoordinates(format!(
                "default centre {:?} is out of range",
                self.default_center
            )));
        }
        if !self.default_span.is_finite() || self.default_span <= 0.0 {
            return Err(PinpointError::InvalidConfig(format!(
                "default_span must be positive, got {}",
                self.default_span
            )));
        }
        if !self.route_inset_ratio.is_finite() || self.route_inset_ratio < 0.0 {
            return Err(PinpointError::InvalidConfig(format!(
                "route_inset_ratio must be non-negative, got {}",
                self.route_inset_ratio
            )));
        }
        if self.http.search_limit == 0 {
            return Err(PinpointError::InvalidConfig(
                "http.search_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Camera region centred on `center` with the configured span
    pub fn region_around(&self, center: Coordinate) -> Region {
        Region::around(center, self.default_span)
    }

    /// Region shown before any location fix is received
    pub fn default_region(&self) -> Region {
        self.region_around(self.default_center)
    }
}

/// Settings for the HTTP-backed search and directions capabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub search_endpoint: String,
    pub directions_endpoint: String,
    pub search_limit: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            search_endpoint: NOMINATIM_ENDPOINT.to_string(),
            directions_endpoint: OSRM_ENDPOINT.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}
