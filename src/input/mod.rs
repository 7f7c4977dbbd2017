pub mod events;

pub use events::{ActionHandled, UserAction};
