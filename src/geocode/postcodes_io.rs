use std::time::Duration;

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::geocode::{GeocodeError, PostcodeLookup};
use crate::model::geo::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://api.postcodes.io";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    result: Option<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Blocking client for a postcodes.io compatible `GET /postcodes/{code}`
/// endpoint.
pub struct PostcodesIoClient {
    client: Client,
    base_url: Url,
}

impl PostcodesIoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| GeocodeError::BaseUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(GeocodeError::BaseUrl(format!(
                "{base_url}: cannot be used as a base url"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ppc-riskscore/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn postcode_url(&self, postcode: &str) -> Result<Url, GeocodeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GeocodeError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("postcodes")
            .push(postcode);
        Ok(url)
    }
}

impl PostcodeLookup for PostcodesIoClient {
    fn lookup(&mut self, postcode: &str) -> Result<Coordinates, GeocodeError> {
        let url = self.postcode_url(postcode)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(GeocodeError::Status(status.as_u16()));
        }
        let body: LookupResponse = response
            .json()
            .map_err(|e| GeocodeError::Malformed(e.to_string()))?;
        let result = body
            .result
            .ok_or_else(|| GeocodeError::Malformed("missing result".to_string()))?;
        match (result.latitude, result.longitude) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon).ok_or_else(|| {
                GeocodeError::Malformed(format!("coordinates out of range: {lat}, {lon}"))
            }),
            _ => Err(GeocodeError::Malformed(
                "result has no coordinates".to_string(),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/geocode/postcodes_io.rs"]
mod tests;
