use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::{DirectionsLauncher, Geocoder, LocationProvider, MapWidget, PlaceStore};
use crate::entities::{Coordinates, Marker, Place, Region, ScreenPoint};
use crate::error::{geocode_error, not_found_error, storage_error, Error};
use crate::external::geocoding::{Geometry, Placemark};

/// In-memory place store with a write-failure switch.
#[derive(Default)]
pub(crate) struct MemoryStore {
    places: Mutex<HashMap<Uuid, Place>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.places.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<Place> {
        self.places.lock().unwrap().get(&id).cloned()
    }

    pub fn seed(&self, title: &str, subtitle: &str, latitude: f64, longitude: f64) -> Place {
        let place = Place::new(
            title.into(),
            subtitle.into(),
            Coordinates::new(latitude, longitude),
        );
        self.places.lock().unwrap().insert(place.id, place.clone());
        place
    }

    fn check_writable(&self) -> Result<(), Error> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(storage_error("writes disabled"));
        }
        Ok(())
    }
}

#[async_trait]
impl PlaceStore for MemoryStore {
    async fn find_place(&self, id: Uuid) -> Result<Place, Error> {
        self.places
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(not_found_error)
    }

    async fn insert_place(&self, place: &Place) -> Result<(), Error> {
        self.check_writable()?;

        let mut places = self.places.lock().unwrap();
        if places.contains_key(&place.id) {
            return Err(storage_error("duplicate id"));
        }
        places.insert(place.id, place.clone());
        Ok(())
    }

    async fn update_place(&self, place: &Place) -> Result<(), Error> {
        self.check_writable()?;

        let mut places = self.places.lock().unwrap();
        if !places.contains_key(&place.id) {
            return Err(not_found_error());
        }
        places.insert(place.id, place.clone());
        Ok(())
    }

    async fn delete_place(&self, id: Uuid) -> Result<(), Error> {
        self.check_writable()?;

        self.places
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(not_found_error)
    }
}

/// Records every widget command; converts a screen point (x, y) to the
/// coordinate (y / 10, x / 10) so tests can predict staged values.
#[derive(Default)]
pub(crate) struct RecordingWidget {
    pub regions: Mutex<Vec<Region>>,
    pub markers: Mutex<Vec<Marker>>,
}

impl MapWidget for RecordingWidget {
    fn set_region(&self, region: Region) {
        self.regions.lock().unwrap().push(region);
    }

    fn add_marker(&self, marker: Marker) {
        self.markers.lock().unwrap().push(marker);
    }

    fn convert_point(&self, point: ScreenPoint) -> Coordinates {
        Coordinates::new(point.y / 10.0, point.x / 10.0)
    }
}

#[derive(Default)]
pub(crate) struct StubLocations {
    running: AtomicBool,
}

impl StubLocations {
    pub fn running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

impl LocationProvider for StubLocations {
    fn start(&self) {
        self.running.store(true, Ordering::Relaxed);
    }

    fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

/// Replies with a canned placemark list, or a geocode failure when told to.
#[derive(Default)]
pub(crate) struct StubGeocoder {
    placemarks: Mutex<Vec<Placemark>>,
    fail: AtomicBool,
}

impl StubGeocoder {
    pub fn respond_with(&self, placemarks: Vec<Placemark>) {
        *self.placemarks.lock().unwrap() = placemarks;
    }

    pub fn fail(&self) {
        self.fail.store(true, Ordering::Relaxed);
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<Vec<Placemark>, Error> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(geocode_error());
        }
        Ok(self.placemarks.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub(crate) struct RecordingLauncher {
    pub launches: Mutex<Vec<(Coordinates, String)>>,
}

impl DirectionsLauncher for RecordingLauncher {
    fn open_driving_directions(&self, destination: Coordinates, name: &str) {
        self.launches
            .lock()
            .unwrap()
            .push((destination, name.to_owned()));
    }
}

pub(crate) fn placemark(address: &str, coordinates: Coordinates) -> Placemark {
    Placemark {
        formatted_address: address.into(),
        geometry: Geometry {
            location: coordinates,
        },
    }
}
