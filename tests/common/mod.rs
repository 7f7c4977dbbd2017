//! In-memory capabilities shared by the integration tests.
//!
//! Gated fakes park each request until the test releases its key, so a
//! test decides in which order responses arrive.

#![allow(dead_code)]

use pinpoint::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn place(name: &str, latitude: f64, longitude: f64) -> Place {
    Place::new(
        name,
        Coordinate::new(latitude, longitude),
        format!("{name}, San Francisco, CA"),
    )
}

pub fn coffee_shops() -> Vec<Place> {
    vec![
        place("Blue Bottle", 37.7822, -122.4076),
        place("Sightglass", 37.7770, -122.4085),
        place("Ritual", 37.7564, -122.4214),
    ]
}

/// Per-key release switches
#[derive(Default)]
pub struct Gates {
    gated: bool,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl Gates {
    pub fn gated() -> Self {
        Self {
            gated: true,
            gates: Mutex::new(HashMap::new()),
        }
    }

    fn gate(&self, key: &str) -> Arc<Notify> {
        self.gates
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    pub fn release(&self, key: &str) {
        self.gate(key).notify_one();
    }

    async fn wait(&self, key: &str) {
        if self.gated {
            self.gate(key).notified().await;
        }
    }
}

#[derive(Default)]
pub struct FakeSearch {
    pub gates: Gates,
    results: Mutex<HashMap<String, Vec<Place>>>,
    fail: bool,
    pub requests: Mutex<Vec<SearchRequest>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gates: Gates::gated(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_results(self, query: &str, places: Vec<Place>) -> Self {
        self.results
            .lock()
            .unwrap()
            .insert(query.to_string(), places);
        self
    }

    pub fn recorded(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearchCapability for FakeSearch {
    async fn search(&self, request: &SearchRequest) -> pinpoint::Result<Vec<Place>> {
        self.requests.lock().unwrap().push(request.clone());
        self.gates.wait(&request.query).await;
        if self.fail {
            return Err(PinpointError::Capability("search backend offline".into()));
        }
        Ok(self
            .results
            .lock()
            .unwrap()
            .get(&request.query)
            .cloned()
            .unwrap_or_default())
    }
}

/// Straight-line path from origin to destination through `via`
pub fn path_via(via: Vec<Coordinate>) -> RoutePath {
    RoutePath {
        polyline: via,
        distance_meters: 2_400.0,
        expected_travel_time: Duration::from_secs(420),
    }
}

#[derive(Default)]
pub struct FakeDirections {
    pub gates: Gates,
    no_route: bool,
    fail: bool,
    unreachable: Vec<String>,
    pub requests: Mutex<Vec<DirectionsRequest>>,
}

impl FakeDirections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gates: Gates::gated(),
            ..Default::default()
        }
    }

    pub fn no_route() -> Self {
        Self {
            no_route: true,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// No path exists to the named destination
    pub fn with_unreachable(mut self, name: &str) -> Self {
        self.unreachable.push(name.to_string());
        self
    }

    pub fn recorded(&self) -> Vec<DirectionsRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectionsCapability for FakeDirections {
    async fn directions(&self, request: &DirectionsRequest) -> pinpoint::Result<Vec<RoutePath>> {
        self.requests.lock().unwrap().push(request.clone());
        self.gates.wait(&request.destination.name).await;
        if self.fail {
            return Err(PinpointError::Capability("directions backend offline".into()));
        }
        if self.no_route || self.unreachable.contains(&request.destination.name) {
            return Ok(Vec::new());
        }
        let origin = request.origin;
        let destination = request.destination.coordinate;
        let midpoint = Coordinate::new(origin.latitude, destination.longitude);
        Ok(vec![
            path_via(vec![origin, midpoint, destination]),
            path_via(vec![origin, destination]),
        ])
    }
}

pub fn scene_for(place: &Place) -> SceneHandle {
    SceneHandle::new(format!("scene:{}", place.name))
}

#[derive(Default)]
pub struct FakePreview {
    pub gates: Gates,
    unavailable: bool,
    pub calls: AtomicUsize,
}

impl FakePreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gates: Gates::gated(),
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl PreviewCapability for FakePreview {
    async fn preview_scene(&self, place: &Place) -> pinpoint::Result<Option<SceneHandle>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gates.wait(&place.name).await;
        if self.unavailable {
            return Ok(None);
        }
        Ok(Some(scene_for(place)))
    }
}

#[derive(Default)]
pub struct RecordingHostApp {
    pub opened: Mutex<Vec<Place>>,
}

impl HostMapApp for RecordingHostApp {
    fn open_in_maps(&self, place: &Place) {
        self.opened.lock().unwrap().push(place.clone());
    }
}

#[derive(Default)]
pub struct FakeLocation {
    pub permission_requests: AtomicUsize,
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
}

impl LocationCapability for FakeLocation {
    fn request_when_in_use_authorization(&self) {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
    }

    fn authorization_status(&self) -> AuthorizationState {
        AuthorizationState::NotDetermined
    }

    fn start_updating(&self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }

    fn stop_updating(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Screen {
    pub vm: MapViewModel,
    pub search: Arc<FakeSearch>,
    pub directions: Arc<FakeDirections>,
    pub preview: Arc<FakePreview>,
    pub host_app: Arc<RecordingHostApp>,
}

pub fn screen(search: FakeSearch, directions: FakeDirections, preview: FakePreview) -> Screen {
    init_logging();
    let search = Arc::new(search);
    let directions = Arc::new(directions);
    let preview = Arc::new(preview);
    let host_app = Arc::new(RecordingHostApp::default());

    let vm = MapScreenBuilder::new()
        .with_search(search.clone())
        .with_directions(directions.clone())
        .with_preview(preview.clone())
        .with_host_app(host_app.clone())
        .build()
        .expect("valid test screen");

    Screen {
        vm,
        search,
        directions,
        preview,
        host_app,
    }
}
