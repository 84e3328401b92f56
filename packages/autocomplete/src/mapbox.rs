//! Mapbox forward-geocoding suggestion source.
//!
//! Requires `MAPBOX_ACCESS_TOKEN`. Results are restricted to US street
//! addresses.
//!
//! See <https://docs.mapbox.com/api/search/geocoding-v5/>

use std::time::Duration;

use async_trait::async_trait;
use fiber_map_geocoder::address::parse_address;

use crate::{AddressSuggestion, AutocompleteError, SuggestionProvider, SuggestionSource};

/// Default geocoding endpoint (the query is appended as a path segment).
pub const MAPBOX_PLACES_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// Environment variable holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Mapbox places client.
#[derive(Debug, Clone)]
pub struct MapboxPlaces {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
    timeout: Duration,
}

impl MapboxPlaces {
    /// Creates a source against the given endpoint.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            access_token: access_token.into(),
            timeout,
        }
    }

    /// Creates the source from [`ACCESS_TOKEN_ENV`], or `None` when the
    /// token is not set.
    #[must_use]
    pub fn from_env(client: reqwest::Client) -> Option<Self> {
        let access_token = std::env::var(ACCESS_TOKEN_ENV).ok()?;
        Some(Self::new(
            client,
            MAPBOX_PLACES_URL,
            access_token,
            Duration::from_secs(5),
        ))
    }
}

#[async_trait]
impl SuggestionSource for MapboxPlaces {
    fn provider(&self) -> SuggestionProvider {
        SuggestionProvider::Mapbox
    }

    async fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, AutocompleteError> {
        let url = format!("{}/{}.json", self.base_url, urlencode(query));
        let limit = limit.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("country", "us"),
                ("types", "address"),
                ("limit", limit.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let body: serde_json::Value = resp.json().await?;
        Ok(parse_response(&body))
    }
}

/// Maps Mapbox features into the common suggestion shape.
fn parse_response(body: &serde_json::Value) -> Vec<AddressSuggestion> {
    let Some(features) = body["features"].as_array() else {
        return Vec::new();
    };

    features
        .iter()
        .filter_map(|feature| {
            let place_name = feature["place_name"].as_str()?;
            Some(AddressSuggestion {
                formatted_address: place_name.to_string(),
                place_id: None,
                components: parse_address(place_name),
                source: SuggestionProvider::Mapbox,
            })
        })
        .collect()
}

/// Percent-encodes a query for use as a URL path segment.
fn urlencode(s: &str) -> String {
    s.replace('%', "%25")
        .replace(' ', "%20")
        .replace('&', "%26")
        .replace('#', "%23")
        .replace('?', "%3F")
        .replace('/', "%2F")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_features() {
        let body = serde_json::json!({
            "features": [
                { "place_name": "456 Broadway Ave, Portland, OR 97201" },
                { "place_name": "456 Broadway St, Vancouver, WA 98660" }
            ]
        });
        let suggestions = parse_response(&body);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(
            suggestions[0].formatted_address,
            "456 Broadway Ave, Portland, OR 97201"
        );
        assert!(suggestions[0].place_id.is_none());
        assert_eq!(suggestions[0].components.state, "OR");
        assert_eq!(suggestions[0].source, SuggestionProvider::Mapbox);
    }

    #[test]
    fn missing_features_is_empty() {
        let body = serde_json::json!({ "message": "Not Authorized" });
        assert!(parse_response(&body).is_empty());
    }

    #[test]
    fn encodes_path_segment() {
        assert_eq!(urlencode("100 Main St"), "100%20Main%20St");
        assert_eq!(urlencode("a/b & c"), "a%2Fb%20%26%20c");
    }
}
