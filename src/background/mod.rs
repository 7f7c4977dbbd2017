pub mod requests;

pub use requests::{RequestToken, RequestTracker};
