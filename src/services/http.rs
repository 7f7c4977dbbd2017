//! HTTP-backed capabilities: OpenStreetMap Nominatim for place search and
//! OSRM for directions.
//!
//! Response decoding lives in plain functions so it can be tested without
//! network access.

use crate::core::config::HttpConfig;
use crate::core::geo::Coordinate;
use crate::core::place::{Place, RoutePath};
use crate::services::routing::{DirectionsCapability, DirectionsRequest};
use crate::services::search::{PlaceSearchCapability, SearchRequest};
use crate::{PinpointError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

fn build_client(config: &HttpConfig) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(15))
        .build()?)
}

/// Place search against a Nominatim `/search` endpoint, bounded to the request region
pub struct NominatimSearch {
    client: Client,
    endpoint: String,
    limit: usize,
}

impl NominatimSearch {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.search_endpoint.clone(),
            limit: config.search_limit,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    name: Option<String>,
    display_name: String,
    lat: String,
    lon: String,
}

/// Decode a Nominatim `jsonv2` response body.
///
/// Entries with unparsable coordinates are skipped.
pub fn parse_nominatim_response(body: &str) -> Result<Vec<Place>> {
    let raw: Vec<NominatimPlace> = serde_json::from_str(body)?;
    let places = raw
        .into_iter()
        .filter_map(|item| {
            let latitude = item.lat.parse::<f64>().ok()?;
            let longitude = item.lon.parse::<f64>().ok()?;
            let name = item
                .name
                .filter(|name| !name.is_empty())
                .or_else(|| item.display_name.split(',').next().map(|s| s.trim().to_string()))
                .unwrap_or_default();
            Some(Place::new(
                name,
                Coordinate::new(latitude, longitude),
                item.display_name,
            ))
        })
        .collect();
    Ok(places)
}

#[async_trait]
impl PlaceSearchCapability for NominatimSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>> {
        let bounds = request.region.bounds();
        // left,top,right,bottom
        let viewbox = format!(
            "{},{},{},{}",
            bounds.south_west.longitude,
            bounds.north_east.latitude,
            bounds.north_east.longitude,
            bounds.south_west.latitude
        );
        let limit = self.limit.to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", request.query.as_str()),
                ("format", "jsonv2"),
                ("limit", limit.as_str()),
                ("viewbox", viewbox.as_str()),
                ("bounded", "1"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PinpointError::Capability(format!(
                "search HTTP {}",
                response.status()
            )));
        }
        let body = response.text().await?;
        parse_nominatim_response(&body)
    }
}

/// Directions against an OSRM `route/v1` endpoint
pub struct OsrmDirections {
    client: Client,
    endpoint: String,
}

impl OsrmDirections {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.directions_endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Decode an OSRM route response with GeoJSON geometry.
///
/// `NoRoute` and `NoSegment` are not errors: they yield no candidates.
pub fn parse_osrm_response(body: &str) -> Result<Vec<RoutePath>> {
    let response: OsrmResponse = serde_json::from_str(body)?;
    match response.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Ok(Vec::new()),
        other => {
            return Err(PinpointError::Capability(format!(
                "directions failed: {} {}",
                other,
                response.message.unwrap_or_default()
            )))
        }
    }

    Ok(response
        .routes
        .into_iter()
        .map(|route| RoutePath {
            polyline: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lon, lat]| Coordinate::new(lat, lon))
                .collect(),
            distance_meters: route.distance,
            expected_travel_time: Duration::from_secs_f64(route.duration.max(0.0)),
        })
        .collect())
}

#[async_trait]
impl DirectionsCapability for OsrmDirections {
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<RoutePath>> {
        let origin = request.origin;
        let destination = request.destination.coordinate;
        let url = format!(
            "{}/{}/{},{};{},{}",
            self.endpoint,
            request.transport.profile(),
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;
        let body = response.text().await?;
        parse_osrm_response(&body)
    }
}
