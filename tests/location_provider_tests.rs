mod common;

use common::*;
use pinpoint::prelude::*;
use std::sync::atomic::Ordering;
use std::sync::{mpsc, OnceLock, Weak};
use std::time::Duration;

fn provider() -> (LocationProvider, Arc<FakeLocation>) {
    init_logging();
    let platform = Arc::new(FakeLocation::default());
    (LocationProvider::new(platform.clone()), platform)
}

#[test]
fn test_request_permission_prompts_platform() {
    let (provider, platform) = provider();

    assert_eq!(provider.authorization_state(), AuthorizationState::NotDetermined);
    provider.request_permission();

    assert_eq!(platform.permission_requests.load(Ordering::SeqCst), 1);
    assert!(!provider.is_updating());
}

#[test]
fn test_authorization_starts_then_stops_updates_keeping_fix() {
    let (provider, platform) = provider();
    let fix = Coordinate::new(37.7600, -122.4300);

    provider.did_change_authorization(AuthorizationState::AuthorizedWhileUsing);
    assert_eq!(platform.starts.load(Ordering::SeqCst), 1);
    assert!(provider.is_updating());

    provider.did_update_locations(&[fix]);
    assert_eq!(provider.current_location(), Some(fix));

    provider.did_change_authorization(AuthorizationState::Denied);
    assert_eq!(platform.stops.load(Ordering::SeqCst), 1);
    assert!(!provider.is_updating());
    assert_eq!(provider.authorization_state(), AuthorizationState::Denied);
    assert_eq!(provider.current_location(), Some(fix));
}

#[test]
fn test_repeated_authorization_does_not_restart_updates() {
    let (provider, platform) = provider();

    provider.did_change_authorization(AuthorizationState::AuthorizedWhileUsing);
    provider.did_change_authorization(AuthorizationState::AuthorizedAlways);

    assert_eq!(platform.starts.load(Ordering::SeqCst), 1);
    assert_eq!(provider.authorization_state(), AuthorizationState::AuthorizedAlways);
}

#[test]
fn test_restricted_never_starts_updates() {
    let (provider, platform) = provider();

    provider.did_change_authorization(AuthorizationState::Restricted);

    assert_eq!(platform.starts.load(Ordering::SeqCst), 0);
    assert!(provider.current_location().is_none());
    assert!(provider.authorization_state().is_refused());
}

#[test]
fn test_latest_fix_of_batch_wins() {
    let (provider, _) = provider();
    let older = Coordinate::new(37.70, -122.40);
    let newer = Coordinate::new(37.71, -122.41);

    provider.did_update_locations(&[older, newer]);
    assert_eq!(provider.current_location(), Some(newer));

    provider.did_update_locations(&[]);
    assert_eq!(provider.current_location(), Some(newer));
}

#[test]
fn test_subscribers_receive_events_in_order() {
    let (provider, _) = provider();
    let events = provider.subscribe();
    let fix = Coordinate::new(37.7600, -122.4300);

    provider.did_change_authorization(AuthorizationState::AuthorizedWhileUsing);
    provider.did_update_locations(&[fix]);

    let received: Vec<LocationEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::AuthorizedWhileUsing),
            LocationEvent::LocationUpdated(fix),
        ]
    );
}

#[test]
fn test_dropped_subscriber_is_pruned() {
    let (provider, _) = provider();
    let kept = provider.subscribe();
    drop(provider.subscribe());

    provider.did_update_locations(&[Coordinate::new(1.0, 2.0)]);
    assert_eq!(kept.try_iter().count(), 1);
}

#[tokio::test]
async fn test_events_drive_map_view_model() {
    let (provider, _) = provider();
    let events = provider.subscribe();
    let mut screen = screen(FakeSearch::new(), FakeDirections::new(), FakePreview::new());
    let fix = Coordinate::new(37.7600, -122.4300);

    provider.request_permission();
    provider.did_change_authorization(AuthorizationState::AuthorizedWhileUsing);
    provider.did_update_locations(&[fix]);

    for event in events.try_iter() {
        screen.vm.apply_location_event(event);
    }

    assert_eq!(
        screen.vm.state().authorization,
        AuthorizationState::AuthorizedWhileUsing
    );
    assert_eq!(screen.vm.state().camera.center, fix);
    assert!(!screen.vm.can_recenter());
}

/// Platform that hands over a cached fix as soon as updates start
#[derive(Default)]
struct CachedFixLocation {
    provider: OnceLock<Weak<LocationProvider>>,
}

impl LocationCapability for CachedFixLocation {
    fn request_when_in_use_authorization(&self) {}

    fn authorization_status(&self) -> AuthorizationState {
        AuthorizationState::NotDetermined
    }

    fn start_updating(&self) {
        if let Some(provider) = self.provider.get().and_then(Weak::upgrade) {
            provider.did_update_locations(&[Coordinate::new(37.7600, -122.4300)]);
        }
    }

    fn stop_updating(&self) {}
}

#[test]
fn test_platform_may_deliver_fix_while_starting() {
    init_logging();
    let platform = Arc::new(CachedFixLocation::default());
    let provider = Arc::new(LocationProvider::new(platform.clone()));
    let _ = platform.provider.set(Arc::downgrade(&provider));
    let events = provider.subscribe();

    let (done_tx, done_rx) = mpsc::channel();
    let worker = provider.clone();
    std::thread::spawn(move || {
        worker.did_change_authorization(AuthorizationState::AuthorizedWhileUsing);
        let _ = done_tx.send(());
    });

    assert!(
        done_rx.recv_timeout(Duration::from_secs(3)).is_ok(),
        "authorization change did not return"
    );
    assert_eq!(
        provider.current_location(),
        Some(Coordinate::new(37.7600, -122.4300))
    );
    assert!(provider.is_updating());

    let received: Vec<LocationEvent> = events.try_iter().collect();
    assert_eq!(received.len(), 2);
    assert!(received.contains(&LocationEvent::AuthorizationChanged(
        AuthorizationState::AuthorizedWhileUsing
    )));
}
