//! US Census Bureau Geocoder client.
//!
//! Uses the free geographies endpoints — no API key required:
//!
//! - Direct: `GET /geocoder/geographies/onelineaddress` with `layers=all`
//!   returns the matched address together with its 2020 census block.
//! - Forward: the same endpoint without `layers`, used purely for its
//!   coordinate output.
//! - Reverse: `GET /geocoder/geographies/coordinates` maps a lat/lng back
//!   to the census block containing it.
//!
//! See <https://geocoding.geo.census.gov/geocoder/Geocoding_Services_API.html>

use std::time::Duration;

use async_trait::async_trait;
use fiber_map_geography_models::BlockGeoid;

use crate::resolver::{CoordinateGeocoder, DirectGeocoder, ReverseGeocoder};
use crate::{Coordinates, GeocodeError};

/// Client for the Census Bureau geographies endpoints.
#[derive(Debug, Clone)]
pub struct CensusGeocoder {
    client: reqwest::Client,
    base_url: String,
    benchmark: String,
    vintage: String,
    timeout: Duration,
}

impl CensusGeocoder {
    /// Creates a client against the given geocoder base URL (e.g.
    /// `"https://geocoding.geo.census.gov/geocoder"`).
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        benchmark: impl Into<String>,
        vintage: impl Into<String>,
        timeout_ms: u64,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            benchmark: benchmark.into(),
            vintage: vintage.into(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, GeocodeError> {
        let url = format!("{}/{path}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("benchmark", self.benchmark.as_str()),
                ("vintage", self.vintage.as_str()),
                ("format", "json"),
            ])
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?;

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl DirectGeocoder for CensusGeocoder {
    async fn geocode_block(&self, address: &str) -> Result<Option<BlockGeoid>, GeocodeError> {
        let body = self
            .get_json(
                "geographies/onelineaddress",
                &[("address", address), ("layers", "all")],
            )
            .await?;

        parse_block_response(&body)
    }
}

#[async_trait]
impl CoordinateGeocoder for CensusGeocoder {
    fn name(&self) -> &'static str {
        "census"
    }

    async fn geocode_coordinates(
        &self,
        address: &str,
    ) -> Result<Option<Coordinates>, GeocodeError> {
        let body = self
            .get_json("geographies/onelineaddress", &[("address", address)])
            .await?;

        parse_coordinate_response(&body)
    }
}

#[async_trait]
impl ReverseGeocoder for CensusGeocoder {
    async fn block_for_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<BlockGeoid>, GeocodeError> {
        let x = coordinates.lng.to_string();
        let y = coordinates.lat.to_string();
        let body = self
            .get_json(
                "geographies/coordinates",
                &[("x", x.as_str()), ("y", y.as_str()), ("layers", "all")],
            )
            .await?;

        parse_reverse_response(&body)
    }
}

/// Parses the direct one-line-address response down to its census block.
///
/// The direct endpoint nests blocks under the vintage-qualified
/// `"2020 Census Blocks"` geography key.
fn parse_block_response(body: &serde_json::Value) -> Result<Option<BlockGeoid>, GeocodeError> {
    let matches =
        body["result"]["addressMatches"]
            .as_array()
            .ok_or_else(|| GeocodeError::Parse {
                message: "Missing addressMatches array".to_string(),
            })?;

    let Some(first) = matches.first() else {
        return Ok(None);
    };

    let Some(blocks) = first["geographies"]["2020 Census Blocks"].as_array() else {
        return Ok(None);
    };

    block_from_geographies(blocks)
}

/// Parses the forward one-line-address response down to coordinates.
fn parse_coordinate_response(
    body: &serde_json::Value,
) -> Result<Option<Coordinates>, GeocodeError> {
    let matches =
        body["result"]["addressMatches"]
            .as_array()
            .ok_or_else(|| GeocodeError::Parse {
                message: "Missing addressMatches array".to_string(),
            })?;

    let Some(first) = matches.first() else {
        return Ok(None);
    };

    let x = first["coordinates"]["x"]
        .as_f64()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing x coordinate".to_string(),
        })?;
    let y = first["coordinates"]["y"]
        .as_f64()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing y coordinate".to_string(),
        })?;

    Ok(Some(Coordinates { lat: y, lng: x }))
}

/// Parses the coordinates-to-geographies response down to its census
/// block.
///
/// The reverse endpoint keys blocks as `"Census Blocks"`, without the
/// vintage qualifier the direct endpoint uses.
fn parse_reverse_response(body: &serde_json::Value) -> Result<Option<BlockGeoid>, GeocodeError> {
    let Some(blocks) = body["result"]["geographies"]["Census Blocks"].as_array() else {
        return Ok(None);
    };

    block_from_geographies(blocks)
}

/// Extracts and decomposes the GEOID of the first block in a geography
/// array.
fn block_from_geographies(
    blocks: &[serde_json::Value],
) -> Result<Option<BlockGeoid>, GeocodeError> {
    let Some(block) = blocks.first() else {
        return Ok(None);
    };

    let geoid = block["GEOID"].as_str().ok_or_else(|| GeocodeError::Parse {
        message: "Missing GEOID on census block".to_string(),
    })?;

    BlockGeoid::parse(geoid)
        .map(Some)
        .map_err(|e| GeocodeError::Parse {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_direct_block_match() {
        let body = serde_json::json!({
            "result": {
                "addressMatches": [{
                    "matchedAddress": "123 MAIN ST, SEATTLE, WA, 98101",
                    "geographies": {
                        "2020 Census Blocks": [{ "GEOID": "530330001001000" }]
                    }
                }]
            }
        });
        let block = parse_block_response(&body).unwrap().unwrap();
        assert_eq!(block.block_geoid, "530330001001000");
        assert_eq!(block.state, "53");
        assert_eq!(block.county, "033");
        assert_eq!(block.tract, "000100");
        assert_eq!(block.block, "1000");
    }

    #[test]
    fn direct_no_match_is_none() {
        let body = serde_json::json!({
            "result": { "addressMatches": [] }
        });
        assert!(parse_block_response(&body).unwrap().is_none());
    }

    #[test]
    fn direct_match_without_block_layer_is_none() {
        let body = serde_json::json!({
            "result": {
                "addressMatches": [{
                    "matchedAddress": "123 MAIN ST, SEATTLE, WA, 98101",
                    "geographies": {}
                }]
            }
        });
        assert!(parse_block_response(&body).unwrap().is_none());
    }

    #[test]
    fn direct_missing_matches_is_parse_error() {
        let body = serde_json::json!({ "result": {} });
        assert!(parse_block_response(&body).is_err());
    }

    #[test]
    fn parses_forward_coordinates() {
        let body = serde_json::json!({
            "result": {
                "addressMatches": [{
                    "coordinates": { "x": -122.332_071, "y": 47.606_209 }
                }]
            }
        });
        let coords = parse_coordinate_response(&body).unwrap().unwrap();
        assert!((coords.lat - 47.606_209).abs() < 1e-6);
        assert!((coords.lng - -122.332_071).abs() < 1e-6);
    }

    #[test]
    fn forward_no_match_is_none() {
        let body = serde_json::json!({
            "result": { "addressMatches": [] }
        });
        assert!(parse_coordinate_response(&body).unwrap().is_none());
    }

    #[test]
    fn parses_reverse_block() {
        let body = serde_json::json!({
            "result": {
                "geographies": {
                    "Census Blocks": [{ "GEOID": "110010047011005" }]
                }
            }
        });
        let block = parse_reverse_response(&body).unwrap().unwrap();
        assert_eq!(block.block_geoid, "110010047011005");
        assert_eq!(block.state, "11");
    }

    #[test]
    fn reverse_without_blocks_is_none() {
        let body = serde_json::json!({
            "result": { "geographies": {} }
        });
        assert!(parse_reverse_response(&body).unwrap().is_none());
    }

    #[test]
    fn malformed_geoid_is_parse_error() {
        let body = serde_json::json!({
            "result": {
                "geographies": {
                    "Census Blocks": [{ "GEOID": "not-a-geoid" }]
                }
            }
        });
        assert!(parse_reverse_response(&body).is_err());
    }
}
