use crate::fetch::{self, FetchError};
use reqwest::Client;
use serde::Deserialize;

/// Current-weather client, scoped to US cities (the service is queried as
/// `{city},{country}` with country fixed to "us").
pub struct WeatherService {
    base_url: String,
    api_key: String,
    country: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub main: WeatherMain,
}

#[derive(Debug, Deserialize, Default)]
pub struct WeatherMain {
    /// Kelvin, as the service reports it.
    #[serde(default)]
    pub temp: f64,
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - 273.15) * 9.0 / 5.0 + 32.0
}

/// One decimal place, the way the temperature is shown.
pub fn format_fahrenheit(fahrenheit: f64) -> String {
    format!("{:.1}", fahrenheit)
}

impl WeatherService {
    pub fn new(base_url: &str, api_key: String, country: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key,
            country: country.to_string(),
        }
    }

    /// Fetch the current temperature for a city, already converted and
    /// formatted for display.
    pub async fn temperature_for(&self, client: &Client, city: &str) -> Result<String, FetchError> {
        let query = format!("{},{}", city, self.country);
        let req = client
            .get(&self.base_url)
            .query(&[("q", query.as_str()), ("appid", self.api_key.as_str())]);
        let resp: WeatherResponse = fetch::get_json(req).await?;
        Ok(format_fahrenheit(kelvin_to_fahrenheit(resp.main.temp)))
    }
}
