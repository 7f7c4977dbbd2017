//! State of the place details sheet.
//!
//! The preview scene for a place is fetched in the background. Showing a
//! different place clears the held scene first, and a response is only
//! applied if it belongs to the request issued for the place currently
//! shown, so a slow answer for an earlier selection never overwrites a
//! newer one.

use crate::{
    background::{RequestToken, RequestTracker},
    core::place::{Place, SceneHandle},
    runtime,
    services::{external::HostMapApp, preview::PreviewClient},
    view_model::observer::{ListenerId, Listeners},
};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// What the preview area of the sheet shows
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    /// "No preview available", also shown while a request is outstanding
    Placeholder,
    Ready(SceneHandle),
}

/// Completed preview request, delivered back to the view-model
#[derive(Debug)]
pub struct PreviewLoaded {
    token: RequestToken,
    place: Place,
    scene: Option<SceneHandle>,
}

pub struct PlaceDetailsViewModel {
    preview_client: PreviewClient,
    host_app: Option<Arc<dyn HostMapApp>>,
    place: Option<Place>,
    scene: Option<SceneHandle>,
    tracker: RequestTracker,
    events_tx: UnboundedSender<PreviewLoaded>,
    events_rx: UnboundedReceiver<PreviewLoaded>,
    listeners: Listeners<PreviewState>,
}

impl PlaceDetailsViewModel {
    pub fn new(preview_client: PreviewClient, host_app: Option<Arc<dyn HostMapApp>>) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            preview_client,
            host_app,
            place: None,
            scene: None,
            tracker: RequestTracker::new(),
            events_tx,
            events_rx,
            listeners: Listeners::default(),
        }
    }

    /// Show `place` in the sheet (or nothing) and fetch its preview
    pub fn show(&mut self, place: Option<Place>) {
        if self.place == place {
            return;
        }

        self.place = place;
        self.scene = None;

        match self.place.clone() {
            Some(place) => {
                let token = self.tracker.issue();
                let client = self.preview_client.clone();
                let tx = self.events_tx.clone();
                log::debug!("fetching preview for {:?}", place.name);
                let _handle = runtime::spawn(async move {
                    let scene = client.preview(&place).await;
                    let _ = tx.send(PreviewLoaded {
                        token,
                        place,
                        scene,
                    });
                });
            }
            None => self.tracker.invalidate(),
        }

        self.listeners.notify(&self.preview());
    }

    pub fn place(&self) -> Option<&Place> {
        self.place.as_ref()
    }

    pub fn title(&self) -> &str {
        self.place.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    pub fn subtitle(&self) -> &str {
        self.place
            .as_ref()
            .map(|p| p.address_summary.as_str())
            .unwrap_or("")
    }

    pub fn preview(&self) -> PreviewState {
        match &self.scene {
            Some(scene) => PreviewState::Ready(scene.clone()),
            None => PreviewState::Placeholder,
        }
    }

    /// A preview request is outstanding
    pub fn is_loading(&self) -> bool {
        self.tracker.is_pending()
    }

    /// Hand the shown place to the host maps app; no-op without a place or host app
    pub fn open_externally(&self) -> bool {
        match (&self.place, &self.host_app) {
            (Some(place), Some(host_app)) => {
                log::info!("opening {:?} in host maps app", place.name);
                host_app.open_in_maps(place);
                true
            }
            _ => false,
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&PreviewState) + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Apply every completed preview request without blocking.
    ///
    /// Returns the number of responses that changed the state.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completed preview request and apply it.
    ///
    /// Returns whether it changed the state (false for stale responses).
    pub async fn next_event(&mut self) -> bool {
        match self.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    pub(crate) async fn recv(&mut self) -> Option<PreviewLoaded> {
        self.events_rx.recv().await
    }

    pub(crate) fn apply(&mut self, event: PreviewLoaded) -> bool {
        let PreviewLoaded {
            token,
            place,
            scene,
        } = event;

        if self.place.as_ref() != Some(&place) || !self.tracker.complete(token) {
            log::debug!("dropping stale preview for {:?}", place.name);
            return false;
        }

        self.scene = scene;
        log::debug!(
            "preview for {:?}: {}",
            place.name,
            if self.scene.is_some() { "ready" } else { "unavailable" }
        );
        self.listeners.notify(&self.preview());
        true
    }
}
