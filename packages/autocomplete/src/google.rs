//! Google Places autocomplete source.
//!
//! Requires `GOOGLE_PLACES_API_KEY`. Predictions are restricted to US
//! street addresses.
//!
//! See <https://developers.google.com/maps/documentation/places/web-service/autocomplete>

use std::time::Duration;

use async_trait::async_trait;
use fiber_map_geocoder::address::parse_address;

use crate::{AddressSuggestion, AutocompleteError, SuggestionProvider, SuggestionSource};

/// Default autocomplete endpoint.
pub const GOOGLE_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/autocomplete/json";

/// Environment variable holding the Places API key.
pub const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

/// Google Places autocomplete client.
#[derive(Debug, Clone)]
pub struct GooglePlaces {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl GooglePlaces {
    /// Creates a source against the given endpoint.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    /// Creates the source from [`API_KEY_ENV`], or `None` when the key
    /// is not set.
    #[must_use]
    pub fn from_env(client: reqwest::Client) -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok()?;
        Some(Self::new(
            client,
            GOOGLE_PLACES_URL,
            api_key,
            Duration::from_secs(5),
        ))
    }
}

#[async_trait]
impl SuggestionSource for GooglePlaces {
    fn provider(&self) -> SuggestionProvider {
        SuggestionProvider::Google
    }

    async fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, AutocompleteError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("input", query),
                ("types", "address"),
                ("components", "country:us"),
                ("key", self.api_key.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let body: serde_json::Value = resp.json().await?;
        Ok(parse_response(&body, limit))
    }
}

/// Maps Places predictions into the common suggestion shape.
///
/// A response without predictions yields no suggestions rather than an
/// error — the upstream returns an empty field for zero matches.
fn parse_response(body: &serde_json::Value, limit: usize) -> Vec<AddressSuggestion> {
    let Some(predictions) = body["predictions"].as_array() else {
        return Vec::new();
    };

    predictions
        .iter()
        .take(limit)
        .filter_map(|prediction| {
            let description = prediction["description"].as_str()?;
            Some(AddressSuggestion {
                formatted_address: description.to_string(),
                place_id: prediction["place_id"].as_str().map(String::from),
                components: parse_address(description),
                source: SuggestionProvider::Google,
            })
        })
        .collect()
}
