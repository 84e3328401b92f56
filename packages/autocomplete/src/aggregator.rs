//! Concurrent fan-out and merge across suggestion sources.

use std::collections::HashSet;

use crate::google::GooglePlaces;
use crate::local::LocalSuggestions;
use crate::mapbox::MapboxPlaces;
use crate::{AddressSuggestion, MIN_QUERY_LEN, SuggestionSource};

/// Fans a query out to every source at once and merges the settled
/// results in source-priority order.
pub struct SuggestionAggregator {
    sources: Vec<Box<dyn SuggestionSource>>,
}

impl SuggestionAggregator {
    /// Assembles an aggregator from explicit sources. Earlier sources
    /// win ties during deduplication.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn SuggestionSource>>) -> Self {
        Self { sources }
    }

    /// Builds the production source chain: Google Places and Mapbox when
    /// their keys are configured, then the built-in local list.
    #[must_use]
    pub fn from_env() -> Self {
        let client = reqwest::Client::new();
        let mut sources: Vec<Box<dyn SuggestionSource>> = Vec::new();

        if let Some(google) = GooglePlaces::from_env(client.clone()) {
            sources.push(Box::new(google));
        } else {
            log::debug!("google autocomplete disabled: no API key configured");
        }

        if let Some(mapbox) = MapboxPlaces::from_env(client) {
            sources.push(Box::new(mapbox));
        } else {
            log::debug!("mapbox autocomplete disabled: no access token configured");
        }

        sources.push(Box::new(LocalSuggestions));

        Self::new(sources)
    }

    /// Returns up to `limit` merged suggestions for a partial query.
    ///
    /// Queries under [`MIN_QUERY_LEN`] characters return empty without
    /// touching any source. Every source runs concurrently and every
    /// branch settles before merging — a failed source is logged and
    /// contributes nothing, and no branch is cancelled because another
    /// finished first.
    pub async fn suggest(&self, query: &str, limit: usize) -> Vec<AddressSuggestion> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        let calls = self.sources.iter().map(|source| source.suggest(query, limit));
        let outcomes = futures::future::join_all(calls).await;

        let mut merged = Vec::new();
        for (source, outcome) in self.sources.iter().zip(outcomes) {
            match outcome {
                Ok(suggestions) => merged.extend(suggestions),
                Err(e) => log::warn!("{} autocomplete failed: {e}", source.provider()),
            }
        }

        let mut unique = dedupe(merged);
        unique.truncate(limit);
        unique
    }
}

/// Drops later entries whose normalized formatted address was already
/// seen, keeping the first (highest-priority) occurrence.
fn dedupe(suggestions: Vec<AddressSuggestion>) -> Vec<AddressSuggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|suggestion| seen.insert(normalize(&suggestion.formatted_address)))
        .collect()
}

/// Lower-cases and collapses whitespace for duplicate detection.
fn normalize(address: &str) -> String {
    address
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
