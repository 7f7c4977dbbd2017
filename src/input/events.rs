use crate::core::place::Place;
use serde::{Deserialize, Serialize};

/// Explicit user actions on the map screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserAction {
    /// Text typed into the search field
    EditSearch { text: String },
    /// Search field submitted
    SubmitSearch,
    /// Marker or search result tapped; `None` clears the selection
    SelectPlace { place: Option<Place> },
    /// Close button on the details sheet
    DismissDetails,
    /// "Get Directions" on the details sheet
    RequestDirections,
    /// "Open in Maps" on the details sheet
    OpenExternally,
    /// Move the camera back onto the user
    Recenter,
    /// Clear results, selection and route
    Reset,
}

/// Whether an action changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionHandled {
    Handled,
    Ignored,
}
