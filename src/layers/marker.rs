use crate::core::{constants::ANNOTATION_TITLE, geo::Coordinate, place::Place};
use serde::Serialize;

/// Pin rendered for a search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    title: String,
    position: Coordinate,
}

impl Marker {
    pub fn new(title: String, position: Coordinate) -> Self {
        Self { title, position }
    }

    pub fn for_place(place: &Place) -> Self {
        Self::new(place.name.clone(), place.coordinate)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "position": {
                "lat": self.position.latitude,
                "lng": self.position.longitude
            }
        })
    }
}

/// The "Current Location" dot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAnnotation {
    title: &'static str,
    position: Coordinate,
}

impl UserAnnotation {
    pub fn new(position: Coordinate) -> Self {
        Self {
            title: ANNOTATION_TITLE,
            position,
        }
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }
}
