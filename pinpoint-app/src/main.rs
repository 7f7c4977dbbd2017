use anyhow::Context;
use async_trait::async_trait;
use pinpoint::constants::{
    GET_DIRECTIONS, NO_PREVIEW_AVAILABLE, OPEN_IN_MAPS, RECENTER, RESET, SEARCH_PLACEHOLDER,
};
use pinpoint::prelude::*;
use std::time::Duration;

/// Scripted map screen session.
///
/// Runs against a small in-memory catalogue by default. With
/// `PINPOINT_ONLINE=1` search and directions go to Nominatim and OSRM.
/// `PINPOINT_CONFIG` may point at a JSON configuration file.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::var("PINPOINT_CONFIG") {
        Ok(path) => MapConfig::from_json_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        Err(_) => MapConfig::default(),
    };
    let online = std::env::var("PINPOINT_ONLINE").map(|v| v == "1").unwrap_or(false);

    let search: Arc<dyn PlaceSearchCapability>;
    let directions: Arc<dyn DirectionsCapability>;
    if online {
        search = Arc::new(NominatimSearch::new(&config.http)?);
        directions = Arc::new(OsrmDirections::new(&config.http)?);
    } else {
        search = Arc::new(DemoCatalogue);
        directions = Arc::new(StraightLineDirections);
    }

    let mut screen = MapScreenBuilder::new()
        .with_config(config)
        .with_search(search)
        .with_directions(directions)
        .with_preview(Arc::new(DemoPreview))
        .with_host_app(Arc::new(PrintingHostApp))
        .build()?;

    screen.subscribe(|state| {
        log::debug!(
            "{:?}: camera {:.4}, {:.4} | {} results",
            state.phase(),
            state.camera.center.latitude,
            state.camera.center.longitude,
            state.search_results.len()
        );
    });

    // Location services grant permission and deliver a fix
    let platform = Arc::new(DemoLocation);
    let location = LocationProvider::new(platform);
    let location_events = location.subscribe();
    location.request_permission();
    location.did_change_authorization(AuthorizationState::AuthorizedWhileUsing);
    location.did_update_locations(&[Coordinate::new(37.7793, -122.4193)]);
    for event in location_events.try_iter() {
        screen.apply_location_event(event);
    }

    println!("[{SEARCH_PLACEHOLDER}] coffee");
    screen.dispatch(UserAction::EditSearch {
        text: "coffee".into(),
    });
    screen.dispatch(UserAction::SubmitSearch);
    while screen.state().search_loading {
        screen.next_event().await;
    }
    println!("Found {} places:", screen.state().search_results.len());
    for marker in screen.rendered_markers() {
        println!("  {}", marker.options());
    }

    let Some(first) = screen.state().search_results.first().cloned() else {
        println!("No results");
        return Ok(());
    };

    screen.dispatch(UserAction::SelectPlace { place: Some(first) });
    while screen.details().is_loading() {
        screen.next_event().await;
    }
    let preview = match screen.details().preview() {
        PreviewState::Ready(scene) => scene.id,
        PreviewState::Placeholder => NO_PREVIEW_AVAILABLE.to_string(),
    };
    println!(
        "{} ({}) preview: {}",
        screen.details().title(),
        screen.details().subtitle(),
        preview
    );
    println!("> {OPEN_IN_MAPS}");
    screen.dispatch(UserAction::OpenExternally);

    println!("> {GET_DIRECTIONS}");
    screen.dispatch(UserAction::RequestDirections);
    while screen.phase() == MapPhase::RouteRequested {
        screen.next_event().await;
    }
    match &screen.state().route {
        Some(route) => println!(
            "Route to {}: {:.0} m, {} min, {} markers shown",
            route.destination.name,
            route.distance_meters,
            route.expected_travel_time.as_secs() / 60,
            screen.rendered_markers().len()
        ),
        None => println!("No route available"),
    }

    if screen.can_recenter() {
        println!("> {RECENTER}");
        screen.dispatch(UserAction::Recenter);
    }

    if screen.can_reset() {
        println!("> {RESET}");
        screen.dispatch(UserAction::Reset);
    }
    println!("Final phase: {:?}", screen.phase());
    Ok(())
}

struct DemoLocation;

impl LocationCapability for DemoLocation {
    fn request_when_in_use_authorization(&self) {
        log::info!("permission prompt shown");
    }

    fn authorization_status(&self) -> AuthorizationState {
        AuthorizationState::NotDetermined
    }

    fn start_updating(&self) {
        log::info!("location updates started");
    }

    fn stop_updating(&self) {
        log::info!("location updates stopped");
    }
}

struct DemoCatalogue;

#[async_trait]
impl PlaceSearchCapability for DemoCatalogue {
    async fn search(&self, request: &SearchRequest) -> pinpoint::Result<Vec<Place>> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let catalogue = [
            ("Blue Bottle Coffee", 37.7822, -122.4076, "66 Mint St"),
            ("Sightglass Coffee", 37.7770, -122.4085, "270 7th St"),
            ("Ritual Coffee Roasters", 37.7564, -122.4214, "1026 Valencia St"),
            ("Tartine Bakery", 37.7614, -122.4241, "600 Guerrero St"),
        ];
        let query = request.query.to_lowercase();
        Ok(catalogue
            .iter()
            .filter(|(name, ..)| name.to_lowercase().contains(&query))
            .map(|(name, lat, lng, street)| {
                Place::new(*name, Coordinate::new(*lat, *lng), format!("{street}, San Francisco"))
            })
            .filter(|place| request.region.contains(&place.coordinate))
            .collect())
    }
}

struct StraightLineDirections;

#[async_trait]
impl DirectionsCapability for StraightLineDirections {
    async fn directions(&self, request: &DirectionsRequest) -> pinpoint::Result<Vec<RoutePath>> {
        tokio::time::sleep(Duration::from_millis(80)).await;
        let origin = request.origin;
        let destination = request.destination.coordinate;
        let distance = origin.distance_to(&destination);
        let speed = match request.transport {
            TransportType::Automobile => 8.0,
            TransportType::Walking => 1.4,
        };
        Ok(vec![RoutePath {
            polyline: vec![origin, destination],
            distance_meters: distance,
            expected_travel_time: Duration::from_secs_f64(distance / speed),
        }])
    }
}

struct DemoPreview;

#[async_trait]
impl PreviewCapability for DemoPreview {
    async fn preview_scene(&self, place: &Place) -> pinpoint::Result<Option<SceneHandle>> {
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok(Some(SceneHandle::new(format!(
            "lookaround:{:.5},{:.5}",
            place.coordinate.latitude, place.coordinate.longitude
        ))))
    }
}

struct PrintingHostApp;

impl HostMapApp for PrintingHostApp {
    fn open_in_maps(&self, place: &Place) {
        println!("Opening {} in the maps app", place.name);
    }
}
