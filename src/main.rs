use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use pindrop::api::{LocationProvider, MapWidget};
use pindrop::entities::{Coordinates, Marker, Region, ScreenPoint};
use pindrop::external::directions::UrlDirectionsLauncher;
use pindrop::external::geocoding::GoogleGeocoder;
use pindrop::session::{EntryParams, GesturePhase, LongPress, MapSession};
use pindrop::store::SqliteStore;

/// Stands in for the platform map view: logs every command it receives.
struct ConsoleWidget;

impl MapWidget for ConsoleWidget {
    fn set_region(&self, region: Region) {
        tracing::info!(?region, "map centered");
    }

    fn add_marker(&self, marker: Marker) {
        tracing::info!(?marker, "marker added");
    }

    fn convert_point(&self, point: ScreenPoint) -> Coordinates {
        // Degrees scaled onto a 1000x1000 viewport.
        Coordinates::new(90.0 - point.y * 0.18, point.x * 0.36 - 180.0)
    }
}

struct ConsoleLocations;

impl LocationProvider for ConsoleLocations {
    fn start(&self) {
        tracing::info!("position feed started");
    }

    fn stop(&self) {
        tracing::info!("position feed stopped");
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_uri = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".into());
    let store = Arc::new(SqliteStore::new(&db_uri, 1).await.unwrap());

    // Drop a pin and save it.
    let mut session = MapSession::new(
        store.clone(),
        Arc::new(ConsoleWidget),
        Arc::new(ConsoleLocations),
        Arc::new(GoogleGeocoder),
        Arc::new(UrlDirectionsLauncher),
        EntryParams::default(),
    );
    let listener = session.subscribe();

    session.open().await.unwrap();
    session.on_location_update(Coordinates::new(51.5072, -0.1276));
    session.on_fields_changed("Westminster", "Big Ben view");
    session.on_long_press(LongPress {
        phase: GesturePhase::Began,
        point: ScreenPoint { x: 500.0, y: 214.0 },
        held: Duration::from_secs(3),
    });

    let place = session.on_save().await.unwrap();
    tracing::info!(id = %listener.recv().await.unwrap().id, "place added");

    // Reopen the saved pin and ask for directions to it.
    let mut session = MapSession::new(
        store,
        Arc::new(ConsoleWidget),
        Arc::new(ConsoleLocations),
        Arc::new(GoogleGeocoder),
        Arc::new(UrlDirectionsLauncher),
        EntryParams {
            id: Some(place.id),
            title: place.title.clone(),
        },
    );
    session.open().await.unwrap();

    if let Some(lookup) = session.on_accessory_tap() {
        lookup.await.unwrap();
    }
}
