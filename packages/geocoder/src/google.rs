//! Google Geocoding API client.
//!
//! Commercial coordinate fallback for addresses the census matcher cannot
//! parse. Only the lat/lng output is consumed; census block recovery
//! always goes back through the census reverse geocoder.
//!
//! Requires an API key (see `api_key_env` in the service TOML
//! configuration).
//!
//! See <https://developers.google.com/maps/documentation/geocoding>

use std::time::Duration;

use async_trait::async_trait;

use crate::resolver::CoordinateGeocoder;
use crate::{Coordinates, GeocodeError};

/// Client for the Google Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl GoogleGeocoder {
    /// Creates a client against the given endpoint (e.g.
    /// `"https://maps.googleapis.com/maps/api/geocode/json"`).
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_ms: u64,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[async_trait]
impl CoordinateGeocoder for GoogleGeocoder {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn geocode_coordinates(
        &self,
        address: &str,
    ) -> Result<Option<Coordinates>, GeocodeError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body)
    }
}

/// Parses a Google geocoding response down to the first result's
/// coordinates.
fn parse_response(body: &serde_json::Value) -> Result<Option<Coordinates>, GeocodeError> {
    let results = body["results"].as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Missing results array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let location = &first["geometry"]["location"];
    let lat = location["lat"].as_f64().ok_or_else(|| GeocodeError::Parse {
        message: "Missing lat in geometry location".to_string(),
    })?;
    let lng = location["lng"].as_f64().ok_or_else(|| GeocodeError::Parse {
        message: "Missing lng in geometry location".to_string(),
    })?;

    Ok(Some(Coordinates { lat, lng }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_result() {
        let body = serde_json::json!({
            "results": [{
                "formatted_address": "123 Main St, Seattle, WA 98101, USA",
                "geometry": {
                    "location": { "lat": 47.6062, "lng": -122.3321 }
                }
            }],
            "status": "OK"
        });
        let coords = parse_response(&body).unwrap().unwrap();
        assert!((coords.lat - 47.6062).abs() < 1e-4);
        assert!((coords.lng - -122.3321).abs() < 1e-4);
    }

    #[test]
    fn empty_results_is_none() {
        let body = serde_json::json!({ "results": [], "status": "ZERO_RESULTS" });
        assert!(parse_response(&body).unwrap().is_none());
    }

    #[test]
    fn missing_results_is_parse_error() {
        let body = serde_json::json!({ "status": "REQUEST_DENIED" });
        assert!(parse_response(&body).is_err());
    }

    #[test]
    fn missing_location_is_parse_error() {
        let body = serde_json::json!({
            "results": [{ "geometry": {} }],
            "status": "OK"
        });
        assert!(parse_response(&body).is_err());
    }
}
