use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

/// A persisted named geographic point with an optional comment. The id is
/// generated once at creation and never reused; the coordinates are fixed at
/// creation as well.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
}

impl Place {
    pub fn new(title: String, subtitle: String, coordinates: Coordinates) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            subtitle,
            coordinates,
        }
    }
}
