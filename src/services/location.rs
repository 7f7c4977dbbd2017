//! Location permission and fix stream.
//!
//! The platform side implements [`LocationCapability`] and forwards its
//! delegate callbacks to [`LocationProvider::did_change_authorization`] and
//! [`LocationProvider::did_update_locations`]. The provider caches the
//! latest state and republishes it to every subscriber.

use crate::core::geo::Coordinate;
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Location permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationState {
    #[default]
    NotDetermined,
    Denied,
    Restricted,
    AuthorizedWhileUsing,
    AuthorizedAlways,
}

impl AuthorizationState {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::AuthorizedWhileUsing | Self::AuthorizedAlways)
    }

    /// Permission was refused and no fix stream will ever start
    pub fn is_refused(&self) -> bool {
        matches!(self, Self::Denied | Self::Restricted)
    }
}

/// Platform location services
pub trait LocationCapability: Send + Sync {
    /// Show the OS permission prompt if the user has not decided yet
    fn request_when_in_use_authorization(&self);

    fn authorization_status(&self) -> AuthorizationState;

    fn start_updating(&self);

    fn stop_updating(&self);
}

/// Change published by the provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationEvent {
    AuthorizationChanged(AuthorizationState),
    LocationUpdated(Coordinate),
}

#[derive(Debug, Default)]
struct ProviderState {
    authorization: AuthorizationState,
    current_location: Option<Coordinate>,
    updating: bool,
}

pub struct LocationProvider {
    capability: Arc<dyn LocationCapability>,
    state: Mutex<ProviderState>,
    subscribers: Mutex<Vec<Sender<LocationEvent>>>,
}

impl LocationProvider {
    pub fn new(capability: Arc<dyn LocationCapability>) -> Self {
        let authorization = capability.authorization_status();
        Self {
            capability,
            state: Mutex::new(ProviderState {
                authorization,
                ..Default::default()
            }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Ask the platform for when-in-use permission.
    ///
    /// The decision arrives later through `did_change_authorization`.
    pub fn request_permission(&self) {
        log::debug!("requesting when-in-use location permission");
        self.capability.request_when_in_use_authorization();
    }

    pub fn authorization_state(&self) -> AuthorizationState {
        self.state().authorization
    }

    /// Latest fix, kept even after permission is withdrawn
    pub fn current_location(&self) -> Option<Coordinate> {
        self.state().current_location
    }

    /// Whether continuous updates are currently running
    pub fn is_updating(&self) -> bool {
        self.state().updating
    }

    /// Subscribe to future authorization and location changes
    pub fn subscribe(&self) -> Receiver<LocationEvent> {
        let (tx, rx) = unbounded();
        self.subscribers().push(tx);
        rx
    }

    /// Delegate callback: the permission decision changed.
    ///
    /// The platform is called after the state lock is released, so it may
    /// deliver a fix synchronously from `start_updating`.
    pub fn did_change_authorization(&self, authorization: AuthorizationState) {
        let transition = {
            let mut state = self.state();
            state.authorization = authorization;
            let was_updating = state.updating;
            state.updating = authorization.is_authorized();
            match (authorization.is_authorized(), was_updating) {
                (true, false) => Some(true),
                (true, true) => None,
                (false, _) => Some(false),
            }
        };

        match transition {
            Some(true) => {
                log::info!("location authorised ({:?}), starting updates", authorization);
                self.capability.start_updating();
            }
            Some(false) => {
                log::info!("location not authorised ({:?}), stopping updates", authorization);
                self.capability.stop_updating();
            }
            None => {}
        }

        self.publish(LocationEvent::AuthorizationChanged(authorization));
    }

    /// Delegate callback: new fixes were delivered; only the most recent one is kept
    pub fn did_update_locations(&self, locations: &[Coordinate]) {
        let Some(latest) = locations.last().copied() else {
            return;
        };
        self.state().current_location = Some(latest);
        log::debug!(
            "location fix {:.5}, {:.5}",
            latest.latitude,
            latest.longitude
        );
        self.publish(LocationEvent::LocationUpdated(latest));
    }

    fn publish(&self, event: LocationEvent) {
        self.subscribers().retain(|tx| tx.send(event).is_ok());
    }

    // A panicking subscriber or platform callback must not lose the cached fix
    fn state(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            log::warn!("location state lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<Sender<LocationEvent>>> {
        self.subscribers.lock().unwrap_or_else(|poisoned| {
            log::warn!("location subscriber lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
