//! Map screen view-model.
//!
//! Owns the UI session state and is its only writer. User actions and
//! location callbacks mutate the state directly; search and directions
//! requests are spawned on the async runtime and their results come back
//! over a channel, to be applied by [`MapViewModel::process_events`] or
//! [`MapViewModel::next_event`]. Results of requests that were superseded
//! or invalidated (new search, new selection, reset) are dropped.

use crate::{
    background::{RequestToken, RequestTracker},
    core::{
        config::MapConfig,
        geo::{Coordinate, Region, REGION_EPSILON},
        place::{Place, Route},
    },
    input::events::{ActionHandled, UserAction},
    layers::{Marker, RouteOverlay, UserAnnotation},
    runtime,
    services::{
        location::{AuthorizationState, LocationEvent},
        routing::RouteClient,
        search::PlaceSearchClient,
    },
    view_model::{
        details::PlaceDetailsViewModel,
        observer::{ListenerId, Listeners},
    },
};
use futures::future::{select, Either};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Composite state of the selection/route machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapPhase {
    Idle,
    PlaceSelected,
    RouteRequested,
    RouteDisplayed,
}

/// Snapshot of the UI session state
#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    pub camera: Region,
    /// Last fix received; absent until the first one
    pub user_location: Option<Coordinate>,
    pub authorization: AuthorizationState,
    /// Where the "Current Location" annotation is drawn
    pub annotation_coordinate: Coordinate,
    pub search_text: String,
    pub search_results: Vec<Place>,
    pub selected_place: Option<Place>,
    pub route: Option<Route>,
    pub details_open: bool,
    pub route_mode: bool,
    pub route_loading: bool,
    pub search_loading: bool,
}

impl MapState {
    fn new(config: &MapConfig) -> Self {
        Self {
            camera: config.default_region(),
            user_location: None,
            authorization: AuthorizationState::NotDetermined,
            annotation_coordinate: config.default_center,
            search_text: String::new(),
            search_results: Vec::new(),
            selected_place: None,
            route: None,
            details_open: false,
            route_mode: false,
            route_loading: false,
            search_loading: false,
        }
    }

    pub fn phase(&self) -> MapPhase {
        if self.route_loading {
            MapPhase::RouteRequested
        } else if self.route_mode && self.route.is_some() {
            MapPhase::RouteDisplayed
        } else if self.selected_place.is_some() {
            MapPhase::PlaceSelected
        } else {
            MapPhase::Idle
        }
    }

    /// Destination of the displayed route
    pub fn route_destination(&self) -> Option<&Place> {
        self.route.as_ref().map(|route| &route.destination)
    }
}

#[derive(Debug)]
enum MapEvent {
    SearchCompleted {
        token: RequestToken,
        query: String,
        places: Vec<Place>,
    },
    RouteCompleted {
        token: RequestToken,
        destination: Place,
        route: Option<Route>,
    },
}

pub struct MapViewModel {
    config: MapConfig,
    state: MapState,
    search_client: PlaceSearchClient,
    route_client: RouteClient,
    details: PlaceDetailsViewModel,
    search_requests: RequestTracker,
    route_requests: RequestTracker,
    events_tx: UnboundedSender<MapEvent>,
    events_rx: UnboundedReceiver<MapEvent>,
    listeners: Listeners<MapState>,
}

impl MapViewModel {
    pub fn new(
        config: MapConfig,
        search_client: PlaceSearchClient,
        route_client: RouteClient,
        details: PlaceDetailsViewModel,
    ) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let state = MapState::new(&config);
        Self {
            config,
            state,
            search_client,
            route_client,
            details,
            search_requests: RequestTracker::new(),
            route_requests: RequestTracker::new(),
            events_tx,
            events_rx,
            listeners: Listeners::default(),
        }
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn phase(&self) -> MapPhase {
        self.state.phase()
    }

    pub fn details(&self) -> &PlaceDetailsViewModel {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut PlaceDetailsViewModel {
        &mut self.details
    }

    pub fn current_region(&self) -> Region {
        self.state.camera
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&MapState) + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify(&self) {
        self.listeners.notify(&self.state);
    }

    /// Region the camera returns to on recenter/reset
    fn home_region(&self) -> (Region, Coordinate) {
        let center = self.state.user_location.unwrap_or(self.config.default_center);
        (self.config.region_around(center), center)
    }

    // --- location inputs ---

    /// A new fix arrived: remember it, move the annotation and follow it with the camera.
    ///
    /// While a route is displayed the camera stays fitted to the route.
    pub fn on_location_update(&mut self, location: Coordinate) {
        self.state.user_location = Some(location);
        self.state.annotation_coordinate = location;
        if self.state.phase() != MapPhase::RouteDisplayed {
            self.state.camera = self.config.region_around(location);
        }
        self.notify();
    }

    /// Permission changed; the cached fix is kept whatever the new state
    pub fn on_authorization_changed(&mut self, authorization: AuthorizationState) {
        if self.state.authorization == authorization {
            return;
        }
        self.state.authorization = authorization;
        self.notify();
    }

    pub fn apply_location_event(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::AuthorizationChanged(authorization) => {
                self.on_authorization_changed(authorization)
            }
            LocationEvent::LocationUpdated(location) => self.on_location_update(location),
        }
    }

    // --- user actions ---

    pub fn dispatch(&mut self, action: UserAction) -> ActionHandled {
        match action {
            UserAction::EditSearch { text } => {
                self.set_search_text(text);
                ActionHandled::Handled
            }
            UserAction::SubmitSearch => self.submit_search(),
            UserAction::SelectPlace { place } => {
                self.select_place(place);
                ActionHandled::Handled
            }
            UserAction::DismissDetails => {
                self.dismiss_details();
                ActionHandled::Handled
            }
            UserAction::RequestDirections => self.request_directions(),
            UserAction::OpenExternally => {
                if self.details.open_externally() {
                    ActionHandled::Handled
                } else {
                    ActionHandled::Ignored
                }
            }
            UserAction::Recenter => {
                self.recenter();
                ActionHandled::Handled
            }
            UserAction::Reset => {
                self.reset();
                ActionHandled::Handled
            }
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
        self.notify();
    }

    /// Search for the current text inside the current camera region.
    ///
    /// Results replace the previous ones wholesale when they arrive.
    pub fn submit_search(&mut self) -> ActionHandled {
        let query = self.state.search_text.clone();
        let region = self.state.camera;
        let token = self.search_requests.issue();
        self.state.search_loading = true;

        let client = self.search_client.clone();
        let tx = self.events_tx.clone();
        log::debug!(
            "searching {:?} around {:.4}, {:.4}",
            query,
            region.center.latitude,
            region.center.longitude
        );
        let _handle = runtime::spawn(async move {
            let places = client.search(&query, region).await;
            let _ = tx.send(MapEvent::SearchCompleted {
                token,
                query,
                places,
            });
        });

        self.notify();
        ActionHandled::Handled
    }

    /// Select a place (opening the details sheet) or clear the selection.
    ///
    /// Selecting while a route is displayed drops the route.
    pub fn select_place(&mut self, place: Option<Place>) {
        let Some(place) = place else {
            self.dismiss_details();
            return;
        };

        if self.state.selected_place.as_ref() != Some(&place) && self.route_requests.is_pending() {
            log::debug!("selection changed, discarding pending directions request");
            self.route_requests.invalidate();
            self.state.route_loading = false;
        }

        if self.state.route_mode {
            log::debug!("new selection, leaving route mode");
            self.state.route = None;
            self.state.route_mode = false;
        }

        self.state.selected_place = Some(place.clone());
        self.state.details_open = true;
        self.details.show(Some(place));
        self.notify();
    }

    /// Close the details sheet and drop the selection
    pub fn dismiss_details(&mut self) {
        if self.route_requests.is_pending() {
            self.route_requests.invalidate();
        }
        self.state.selected_place = None;
        self.state.details_open = false;
        self.state.route_loading = false;
        self.details.show(None);
        self.notify();
    }

    /// Request a route from the camera centre to the selected place.
    ///
    /// Ignored when nothing is selected.
    pub fn request_directions(&mut self) -> ActionHandled {
        let Some(destination) = self.state.selected_place.clone() else {
            log::debug!("directions requested without a selected place");
            return ActionHandled::Ignored;
        };

        let origin = self.state.camera.center;
        let token = self.route_requests.issue();
        self.state.route_loading = true;

        let client = self.route_client.clone();
        let tx = self.events_tx.clone();
        log::debug!("requesting directions to {:?}", destination.name);
        let _handle = runtime::spawn(async move {
            let route = client.route(origin, &destination).await;
            let _ = tx.send(MapEvent::RouteCompleted {
                token,
                destination,
                route,
            });
        });

        self.notify();
        ActionHandled::Handled
    }

    /// Move the camera and annotation back onto the user (or the default centre)
    pub fn recenter(&mut self) {
        let (region, center) = self.home_region();
        self.state.camera = region;
        self.state.annotation_coordinate = center;
        self.notify();
    }

    /// Clear results, selection, route and search text together and recenter
    pub fn reset(&mut self) {
        let (region, center) = self.home_region();
        self.search_requests.invalidate();
        self.route_requests.invalidate();

        self.state.camera = region;
        self.state.annotation_coordinate = center;
        self.state.search_results.clear();
        self.state.search_text.clear();
        self.state.search_loading = false;
        self.state.selected_place = None;
        self.state.route = None;
        self.state.route_mode = false;
        self.state.route_loading = false;
        self.state.details_open = false;
        self.details.show(None);

        log::info!("map reset");
        self.notify();
    }

    // --- derived view data ---

    /// Markers to draw: only the destination while a route is displayed, every result otherwise
    pub fn rendered_markers(&self) -> Vec<Marker> {
        if self.state.phase() == MapPhase::RouteDisplayed {
            return self
                .state
                .route_destination()
                .map(Marker::for_place)
                .into_iter()
                .collect();
        }
        self.state
            .search_results
            .iter()
            .map(Marker::for_place)
            .collect()
    }

    /// "Current Location" annotation; hidden once permission was refused
    pub fn user_annotation(&self) -> Option<UserAnnotation> {
        if self.state.authorization.is_refused() {
            None
        } else {
            Some(UserAnnotation::new(self.state.annotation_coordinate))
        }
    }

    pub fn route_overlay(&self) -> Option<RouteOverlay> {
        if self.state.route_mode {
            self.state.route.as_ref().map(RouteOverlay::from_route)
        } else {
            None
        }
    }

    /// The camera has moved away from the user/default region
    pub fn can_recenter(&self) -> bool {
        let (home, _) = self.home_region();
        !self.state.camera.approx_eq(&home, REGION_EPSILON)
    }

    pub fn can_reset(&self) -> bool {
        !self.state.search_results.is_empty()
    }

    // --- async results ---

    /// Apply every completed request (map and details sheet) without blocking.
    ///
    /// Returns the number of results that changed the state.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied + self.details.process_events()
    }

    /// Wait for the next completed request (map or details sheet) and apply it.
    ///
    /// Returns whether it changed the state (false for stale results).
    pub async fn next_event(&mut self) -> bool {
        let received = {
            let map_rx = Box::pin(self.events_rx.recv());
            let details_rx = Box::pin(self.details.recv());
            match select(map_rx, details_rx).await {
                Either::Left((event, _)) => Either::Left(event),
                Either::Right((event, _)) => Either::Right(event),
            }
        };

        match received {
            Either::Left(Some(event)) => self.apply(event),
            Either::Right(Some(event)) => self.details.apply(event),
            Either::Left(None) | Either::Right(None) => false,
        }
    }

    fn apply(&mut self, event: MapEvent) -> bool {
        match event {
            MapEvent::SearchCompleted {
                token,
                query,
                places,
            } => {
                if !self.search_requests.complete(token) {
                    log::debug!("dropping stale results for {:?}", query);
                    return false;
                }
                log::info!("search {:?}: {} results", query, places.len());
                self.state.search_loading = false;
                self.state.search_results = places;
            }
            MapEvent::RouteCompleted {
                token,
                destination,
                route,
            } => {
                if self.state.selected_place.as_ref() != Some(&destination)
                    || !self.route_requests.complete(token)
                {
                    log::debug!("dropping stale route to {:?}", destination.name);
                    return false;
                }
                self.state.route_loading = false;

                match route {
                    Some(route) => {
                        log::info!(
                            "route to {:?} displayed ({:.0} m)",
                            destination.name,
                            route.distance_meters
                        );
                        self.state.camera = route.bounding_region;
                        self.state.route = Some(route);
                        self.state.route_mode = true;
                        self.state.details_open = false;
                        self.state.selected_place = None;
                        self.details.show(None);
                    }
                    None => {
                        log::warn!("no route to {:?}, staying on place details", destination.name);
                    }
                }
            }
        }
        self.notify();
        true
    }
}
