mod common;

use common::*;
use pinpoint::prelude::*;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

fn details(preview: Arc<FakePreview>) -> (PlaceDetailsViewModel, Arc<RecordingHostApp>) {
    init_logging();
    let host_app = Arc::new(RecordingHostApp::default());
    let host: Arc<dyn HostMapApp> = host_app.clone();
    let vm = PlaceDetailsViewModel::new(PreviewClient::new(preview), Some(host));
    (vm, host_app)
}

#[tokio::test]
async fn test_preview_loads_for_selected_place() {
    let preview = Arc::new(FakePreview::new());
    let (mut vm, _) = details(preview.clone());
    let cafe = place("Blue Bottle", 37.7822, -122.4076);

    vm.show(Some(cafe.clone()));
    assert_eq!(vm.preview(), PreviewState::Placeholder);
    assert!(vm.is_loading());

    assert!(vm.next_event().await);
    assert_eq!(vm.preview(), PreviewState::Ready(scene_for(&cafe)));
    assert!(!vm.is_loading());
    assert_eq!(preview.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_late_preview_for_previous_place_is_discarded() {
    let preview = Arc::new(FakePreview::gated());
    let (mut vm, _) = details(preview.clone());
    let a = place("Blue Bottle", 37.7822, -122.4076);
    let b = place("Sightglass", 37.7770, -122.4085);

    vm.show(Some(a.clone()));
    vm.show(Some(b.clone()));

    preview.gates.release("Sightglass");
    assert!(vm.next_event().await);
    assert_eq!(vm.preview(), PreviewState::Ready(scene_for(&b)));

    preview.gates.release("Blue Bottle");
    assert!(!vm.next_event().await);
    assert_eq!(vm.preview(), PreviewState::Ready(scene_for(&b)));
}

#[tokio::test]
async fn test_early_preview_for_previous_place_never_renders() {
    let preview = Arc::new(FakePreview::gated());
    let (mut vm, _) = details(preview.clone());
    let a = place("Blue Bottle", 37.7822, -122.4076);
    let b = place("Sightglass", 37.7770, -122.4085);

    vm.show(Some(a.clone()));
    vm.show(Some(b.clone()));

    preview.gates.release("Blue Bottle");
    assert!(!vm.next_event().await);
    assert_eq!(vm.preview(), PreviewState::Placeholder);

    preview.gates.release("Sightglass");
    assert!(vm.next_event().await);
    assert_eq!(vm.preview(), PreviewState::Ready(scene_for(&b)));
}

#[tokio::test]
async fn test_reselecting_earlier_place_ignores_its_first_request() {
    let preview = Arc::new(FakePreview::gated());
    let (mut vm, _) = details(preview.clone());
    let a = place("Blue Bottle", 37.7822, -122.4076);
    let b = place("Sightglass", 37.7770, -122.4085);

    vm.show(Some(a.clone()));
    vm.show(Some(b));
    vm.show(Some(a.clone()));

    preview.gates.release("Sightglass");
    assert!(!vm.next_event().await);

    // both requests for A are parked on the same gate; release them one at a time
    let mut applied = 0;
    for _ in 0..2 {
        preview.gates.release("Blue Bottle");
        if vm.next_event().await {
            applied += 1;
        }
    }

    assert_eq!(applied, 1);
    assert_eq!(vm.preview(), PreviewState::Ready(scene_for(&a)));
}

#[tokio::test]
async fn test_switching_place_clears_held_scene() {
    let preview = Arc::new(FakePreview::new());
    let (mut vm, _) = details(preview);
    let a = place("Blue Bottle", 37.7822, -122.4076);
    let b = place("Sightglass", 37.7770, -122.4085);

    vm.show(Some(a));
    assert!(vm.next_event().await);
    assert!(matches!(vm.preview(), PreviewState::Ready(_)));

    vm.show(Some(b));
    assert_eq!(vm.preview(), PreviewState::Placeholder);
}

#[tokio::test]
async fn test_unavailable_preview_shows_placeholder() {
    let preview = Arc::new(FakePreview::unavailable());
    let (mut vm, _) = details(preview);

    vm.show(Some(place("Ritual", 37.7564, -122.4214)));
    assert!(vm.next_event().await);

    assert_eq!(vm.preview(), PreviewState::Placeholder);
    assert!(!vm.is_loading());
}

#[tokio::test]
async fn test_clearing_place_drops_outstanding_preview() {
    let preview = Arc::new(FakePreview::gated());
    let (mut vm, _) = details(preview.clone());

    vm.show(Some(place("Ritual", 37.7564, -122.4214)));
    vm.show(None);
    assert_eq!(vm.title(), "");
    assert_eq!(vm.subtitle(), "");

    preview.gates.release("Ritual");
    assert!(!vm.next_event().await);
    assert_eq!(vm.preview(), PreviewState::Placeholder);
}

#[tokio::test]
async fn test_same_place_is_not_refetched() {
    let preview = Arc::new(FakePreview::new());
    let (mut vm, _) = details(preview.clone());
    let cafe = place("Ritual", 37.7564, -122.4214);

    vm.show(Some(cafe.clone()));
    vm.show(Some(cafe));
    assert!(vm.next_event().await);
    assert_eq!(preview.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_open_externally() {
    let (mut vm, host_app) = details(Arc::new(FakePreview::new()));
    assert!(!vm.open_externally());

    let cafe = place("Ritual", 37.7564, -122.4214);
    vm.show(Some(cafe.clone()));
    assert!(vm.open_externally());
    assert_eq!(*host_app.opened.lock().unwrap(), vec![cafe]);
}

#[tokio::test]
async fn test_listeners_see_preview_transitions() {
    let (mut vm, _) = details(Arc::new(FakePreview::new()));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = seen.clone();
    vm.subscribe(move |preview| log.lock().unwrap().push(preview.clone()));

    let cafe = place("Ritual", 37.7564, -122.4214);
    vm.show(Some(cafe.clone()));
    assert!(vm.next_event().await);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.first(), Some(&PreviewState::Placeholder));
    assert_eq!(seen.last(), Some(&PreviewState::Ready(scene_for(&cafe))));
}
