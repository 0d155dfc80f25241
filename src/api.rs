use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{Coordinates, Marker, Place, Region, ScreenPoint};
use crate::error::Error;
use crate::external::geocoding::Placemark;

/// Durable keyed storage of places.
#[async_trait]
pub trait PlaceStore {
    async fn find_place(&self, id: Uuid) -> Result<Place, Error>;
    async fn insert_place(&self, place: &Place) -> Result<(), Error>;
    async fn update_place(&self, place: &Place) -> Result<(), Error>;
    async fn delete_place(&self, id: Uuid) -> Result<(), Error>;
}

/// Command surface of the map widget. Gesture events travel the other way,
/// delivered to the session by whoever drives it.
pub trait MapWidget {
    fn set_region(&self, region: Region);
    fn add_marker(&self, marker: Marker);
    fn convert_point(&self, point: ScreenPoint) -> Coordinates;
}

/// Device position feed. Updates are delivered to the session as calls to
/// `MapSession::on_location_update`.
pub trait LocationProvider {
    fn start(&self);
    fn stop(&self);
}

#[async_trait]
pub trait Geocoder {
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Vec<Placemark>, Error>;
}

/// Hands a destination off to an external navigation flow; never awaited for
/// a result.
pub trait DirectionsLauncher {
    fn open_driving_directions(&self, destination: Coordinates, name: &str);
}

pub type DynStore = Arc<dyn PlaceStore + Send + Sync>;
pub type DynMapWidget = Arc<dyn MapWidget + Send + Sync>;
pub type DynLocationProvider = Arc<dyn LocationProvider + Send + Sync>;
pub type DynGeocoder = Arc<dyn Geocoder + Send + Sync>;
pub type DynDirectionsLauncher = Arc<dyn DirectionsLauncher + Send + Sync>;
