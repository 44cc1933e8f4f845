use super::Coordinates;
use crate::config::LocationConfig;
use crate::fetch::{self, FetchError};
use reqwest::Client;
use serde::Deserialize;

/// Where the current position comes from. Without a browser there is no device
/// geolocation API; the position is either pinned in the config file or looked
/// up from an IP geolocation endpoint. Neither configured means the location
/// chain never starts.
pub enum PositionSource {
    Fixed(Coordinates),
    IpLookup { url: String },
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Pick the position source from config. Fixed coordinates win over IP lookup.
pub fn position_source(config: &LocationConfig) -> Option<PositionSource> {
    if let (Some(latitude), Some(longitude)) = (config.latitude, config.longitude) {
        return Some(PositionSource::Fixed(Coordinates { latitude, longitude }));
    }
    config
        .ip_lookup_url
        .as_ref()
        .map(|url| PositionSource::IpLookup { url: url.clone() })
}

impl PositionSource {
    /// Resolve the current position. One call, no retry.
    pub async fn resolve(&self, client: &Client) -> Result<Coordinates, FetchError> {
        match self {
            PositionSource::Fixed(coords) => Ok(*coords),
            PositionSource::IpLookup { url } => {
                let resp: IpLookupResponse = fetch::get_json(client.get(url)).await?;
                if resp.status.as_deref() == Some("fail") {
                    return Err(FetchError::RequestFailed {
                        status: None,
                        message: "ip lookup reported failure".to_string(),
                    });
                }
                match (resp.lat, resp.lon) {
                    (Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
                    _ => Err(FetchError::MalformedResponse {
                        message: "ip lookup response missing lat/lon".to_string(),
                    }),
                }
            }
        }
    }
}
