use super::Coordinates;
use crate::fetch::{self, FetchError};
use reqwest::Client;
use serde::Deserialize;

/// Reverse geocoding client. One GET per resolution; the city is the first
/// result's first location's `adminArea5` field.
pub struct Geocoder {
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub locations: Vec<GeocodeLocation>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeLocation {
    #[serde(default, rename = "adminArea5")]
    pub admin_area5: Option<String>,
}

/// Extract the city from a response. Zero results (or an empty locality) is a
/// `NoLocationMatch` failure rather than an index panic.
pub fn city_from_response(resp: ReverseGeocodeResponse) -> Result<String, FetchError> {
    resp.results
        .into_iter()
        .next()
        .and_then(|r| r.locations.into_iter().next())
        .and_then(|l| l.admin_area5)
        .filter(|city| !city.is_empty())
        .ok_or(FetchError::NoLocationMatch)
}

impl Geocoder {
    pub fn new(base_url: &str, api_key: String) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key,
        }
    }

    pub async fn city_for(&self, client: &Client, coords: Coordinates) -> Result<String, FetchError> {
        let location = format!("{},{}", coords.latitude, coords.longitude);
        let req = client
            .get(&self.base_url)
            .query(&[("key", self.api_key.as_str()), ("location", location.as_str())]);
        let resp: ReverseGeocodeResponse = fetch::get_json(req).await?;
        city_from_response(resp)
    }
}

/// The header links the resolved city to its encyclopedia page.
pub fn wiki_url(city: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", city)
}
