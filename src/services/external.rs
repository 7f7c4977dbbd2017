use crate::core::place::Place;

/// The host platform's own maps application
pub trait HostMapApp: Send + Sync {
    /// Fire-and-forget hand-off of `place` to the host app
    fn open_in_maps(&self, place: &Place);
}
