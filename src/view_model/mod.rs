pub mod builder;
pub mod details;
pub mod map;
pub mod observer;

pub use builder::MapScreenBuilder;
pub use details::{PlaceDetailsViewModel, PreviewState};
pub use map::{MapPhase, MapState, MapViewModel};
pub use observer::{ListenerId, Listeners};
