#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address autocomplete for the fiber availability search box.
//!
//! A partial query fans out to every configured suggestion source at once
//! (Google Places, Mapbox, and a built-in local list), waits for all of
//! them to settle, then merges, deduplicates, and truncates the combined
//! results. A source that fails or is unconfigured contributes nothing;
//! it never blocks or cancels the others.

pub mod aggregator;
pub mod google;
pub mod local;
pub mod mapbox;

use async_trait::async_trait;
use fiber_map_geocoder::Address;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// Minimum query length before any source is consulted.
pub const MIN_QUERY_LEN: usize = 3;

/// Which suggestion source produced an entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SuggestionProvider {
    /// Google Places autocomplete.
    Google,
    /// Mapbox forward geocoding.
    Mapbox,
    /// Built-in local fallback list.
    Local,
}

/// A single address suggestion in the common shape all sources map into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSuggestion {
    /// Display string for the suggestion list.
    pub formatted_address: String,
    /// Provider-specific place identifier, when the source has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Components parsed with the shared comma-delimited heuristic.
    pub components: Address,
    /// Which source produced this suggestion.
    pub source: SuggestionProvider,
}

/// Errors from a single autocomplete source call.
#[derive(Debug, Error)]
pub enum AutocompleteError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// An autocomplete backend that turns a partial query into suggestions.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// The tag stamped on this source's suggestions.
    fn provider(&self) -> SuggestionProvider;

    /// Returns up to `limit` suggestions for the query.
    ///
    /// # Errors
    ///
    /// Returns [`AutocompleteError`] if the request or response parsing
    /// fails. The aggregator absorbs the error; it never reaches the
    /// search box.
    async fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, AutocompleteError>;
}
