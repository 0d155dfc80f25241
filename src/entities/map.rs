use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// A point in the map widget's screen space, as reported by a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: Coordinates,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub title: String,
    pub subtitle: String,
    pub coordinates: Coordinates,
}
