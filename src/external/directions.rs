use crate::api::DirectionsLauncher;
use crate::entities::Coordinates;

/// Universal maps directions URL preset to driving mode.
pub fn directions_url(destination: Coordinates) -> String {
    let latlng: String = destination.into();
    format!("https://www.google.com/maps/dir/?api=1&destination={latlng}&travelmode=driving")
}

/// Hands the destination to the platform's URL opener. The launch is fire and
/// forget; this impl reports the URL it resolved.
pub struct UrlDirectionsLauncher;

impl DirectionsLauncher for UrlDirectionsLauncher {
    fn open_driving_directions(&self, destination: Coordinates, name: &str) {
        let url = directions_url(destination);
        tracing::info!(%url, name, "opening driving directions");
    }
}
