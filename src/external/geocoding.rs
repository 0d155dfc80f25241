use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;

use crate::api::Geocoder;
use crate::entities::Coordinates;
use crate::error::{geocode_error, invalid_input_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Placemark {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    results: Option<T>,
}

#[tracing::instrument]
pub async fn reverse_geocode(coordinates: Coordinates) -> Result<Vec<Placemark>, Error> {
    let latlng: String = coordinates.into();

    let api_base = env::var("GEOCODING_API_BASE")?;
    let url = format!("https://{}/maps/api/geocode/json", api_base);
    let key = env::var("GEOCODING_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("latlng", latlng)])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(geocode_error());
    }

    let data: Response<Vec<Placemark>> = res.json().await?;

    if !(data.status == "OK" || data.status == "ZERO_RESULTS") {
        return Err(geocode_error());
    }

    Ok(data.results.unwrap_or_default())
}

/// `Geocoder` backed by the hosted reverse-geocoding endpoint.
pub struct GoogleGeocoder;

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Vec<Placemark>, Error> {
        reverse_geocode(coordinates).await
    }
}
