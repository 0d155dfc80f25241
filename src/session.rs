use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_channel::{Receiver, Sender};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::{DynDirectionsLauncher, DynGeocoder, DynLocationProvider, DynMapWidget, DynStore};
use crate::editor::PlaceEditor;
use crate::entities::{Coordinates, Marker, Place, Region, ScreenPoint, Span};
use crate::error::Error;

/// Fixed zoom span applied whenever the session centers the map.
pub const ZOOM_SPAN: Span = Span {
    latitude_delta: 0.01,
    longitude_delta: 0.01,
};

/// Minimum hold before a long press counts as a pin drop rather than a tap.
pub const MIN_PRESS_DURATION: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    CreatingNew,
    ViewingExisting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
}

#[derive(Clone, Copy, Debug)]
pub struct LongPress {
    pub phase: GesturePhase,
    pub point: ScreenPoint,
    pub held: Duration,
}

/// Broadcast once per successful save, consumed by whatever screen lists the
/// saved places.
#[derive(Clone, Debug)]
pub struct PlaceAdded {
    pub id: Uuid,
}

/// Entry parameters of a screen visit. A non-empty title alongside an id
/// selects viewing-existing mode.
#[derive(Clone, Debug, Default)]
pub struct EntryParams {
    pub id: Option<Uuid>,
    pub title: String,
}

/// Coordinates the map display, the position feed, pin-drop gestures and the
/// directions launch for one screen visit. The mode is fixed at construction
/// and never changes.
pub struct MapSession {
    mode: Mode,
    selected_id: Option<Uuid>,
    editor: PlaceEditor,
    store: DynStore,
    map: DynMapWidget,
    locations: DynLocationProvider,
    geocoder: DynGeocoder,
    directions: DynDirectionsLauncher,
    min_press: Duration,
    notices: Sender<PlaceAdded>,
    listener: Receiver<PlaceAdded>,
    alive: Arc<AtomicBool>,
}

impl MapSession {
    pub fn new(
        store: DynStore,
        map: DynMapWidget,
        locations: DynLocationProvider,
        geocoder: DynGeocoder,
        directions: DynDirectionsLauncher,
        entry: EntryParams,
    ) -> Self {
        let mode = if entry.id.is_some() && !entry.title.is_empty() {
            Mode::ViewingExisting
        } else {
            Mode::CreatingNew
        };

        let (notices, listener) = async_channel::unbounded();

        Self {
            mode,
            selected_id: entry.id,
            editor: PlaceEditor::new(),
            store,
            map,
            locations,
            geocoder,
            directions,
            min_press: MIN_PRESS_DURATION,
            notices,
            listener,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn with_min_press(mut self, min_press: Duration) -> Self {
        self.min_press = min_press;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn editor(&self) -> &PlaceEditor {
        &self.editor
    }

    pub fn subscribe(&self) -> Receiver<PlaceAdded> {
        self.listener.clone()
    }

    /// Starts the position feed and, when bound to an existing place, loads
    /// and renders it.
    #[tracing::instrument(skip(self))]
    pub async fn open(&mut self) -> Result<(), Error> {
        self.locations.start();

        if self.mode == Mode::ViewingExisting {
            if let Some(id) = self.selected_id {
                self.load_existing(id).await?;
            }
        }

        Ok(())
    }

    async fn load_existing(&mut self, id: Uuid) -> Result<(), Error> {
        let place = match self.store.find_place(id).await {
            Ok(place) => place,
            Err(err) if err.is_not_found() => {
                // Baseline behavior: no marker, empty fields, no error shown.
                tracing::warn!(%id, "no stored place for id");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        self.locations.stop();
        self.editor.load_existing(&place);

        self.map.add_marker(Marker {
            title: place.title.clone(),
            subtitle: place.subtitle.clone(),
            coordinates: place.coordinates,
        });
        self.map.set_region(Region {
            center: place.coordinates,
            span: ZOOM_SPAN,
        });

        Ok(())
    }

    /// Re-centers on the device position while creating a new place. Ignored
    /// once the session views an existing place, so the device's own location
    /// never overrides the loaded view.
    pub fn on_location_update(&self, coordinates: Coordinates) {
        if self.mode == Mode::ViewingExisting {
            return;
        }

        self.map.set_region(Region {
            center: coordinates,
            span: ZOOM_SPAN,
        });
    }

    /// Stages a pin for a qualifying gesture: only the begin phase, and only
    /// after the minimum hold. Mid-drag repeats never re-stage.
    pub fn on_long_press(&mut self, press: LongPress) {
        if press.phase != GesturePhase::Began || press.held < self.min_press {
            return;
        }

        let coordinates = self.map.convert_point(press.point);
        self.editor.stage_location(coordinates);

        self.map.add_marker(Marker {
            title: self.editor.title().into(),
            subtitle: self.editor.subtitle().into(),
            coordinates,
        });
    }

    pub fn on_fields_changed(&mut self, title: &str, subtitle: &str) {
        self.editor.set_fields(title, subtitle);
    }

    /// Reverse-geocodes the stored coordinate and launches driving
    /// directions to the first placemark, keeping the stored title as the
    /// destination name. The lookup runs detached; errors and empty result
    /// lists are swallowed, and a completion that lands after the session
    /// closed is discarded.
    pub fn on_accessory_tap(&self) -> Option<JoinHandle<()>> {
        if self.mode != Mode::ViewingExisting {
            return None;
        }

        let coordinates = self.editor.staged_location()?;
        let name = self.editor.title().to_owned();
        let geocoder = Arc::clone(&self.geocoder);
        let directions = Arc::clone(&self.directions);
        let alive = Arc::clone(&self.alive);

        Some(tokio::spawn(async move {
            let placemarks = match geocoder.reverse_geocode(coordinates).await {
                Ok(placemarks) => placemarks,
                Err(err) => {
                    tracing::debug!(?err, "reverse geocode failed");
                    return;
                }
            };

            let placemark = match placemarks.first() {
                Some(placemark) => placemark,
                None => return,
            };

            if !alive.load(Ordering::Acquire) {
                return;
            }

            directions.open_driving_directions(placemark.geometry.location, &name);
        }))
    }

    /// Commits the staged place and broadcasts the completion signal. The
    /// caller navigates back whatever the outcome; a storage failure is
    /// logged and reported through the return value, never a panic.
    #[tracing::instrument(skip(self))]
    pub async fn on_save(&mut self) -> Option<Place> {
        let result = self.editor.commit(self.store.as_ref()).await;
        self.close();

        match result {
            Ok(place) => {
                let _ = self.notices.send(PlaceAdded { id: place.id }).await;
                Some(place)
            }
            Err(err) => {
                tracing::error!(?err, "failed to save place");
                None
            }
        }
    }

    /// Tears the session down: stops the position feed and turns any late
    /// collaborator completion into a no-op.
    pub fn close(&self) {
        self.alive.store(false, Ordering::Release);
        self.locations.stop();
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        self.close();
    }
}
