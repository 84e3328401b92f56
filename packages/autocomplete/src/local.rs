//! Built-in fallback suggestion source.
//!
//! A tiny seeded address list so the search box still autocompletes when
//! no commercial source is configured. Matching is a case-insensitive
//! substring test against the formatted address.

use async_trait::async_trait;
use fiber_map_geocoder::address::parse_address;

use crate::{AddressSuggestion, AutocompleteError, SuggestionProvider, SuggestionSource};

/// Seed addresses served by the local source.
const SEED_ADDRESSES: &[&str] = &[
    "123 Main St, Seattle, WA 98101",
    "456 Broadway Ave, Portland, OR 97201",
    "789 Pine St, San Francisco, CA 94102",
];

/// Always-available suggestion source backed by [`SEED_ADDRESSES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSuggestions;

#[async_trait]
impl SuggestionSource for LocalSuggestions {
    fn provider(&self) -> SuggestionProvider {
        SuggestionProvider::Local
    }

    async fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, AutocompleteError> {
        let query = query.to_lowercase();

        Ok(SEED_ADDRESSES
            .iter()
            .filter(|address| address.to_lowercase().contains(&query))
            .take(limit)
            .map(|address| AddressSuggestion {
                formatted_address: (*address).to_string(),
                place_id: None,
                components: parse_address(address),
                source: SuggestionProvider::Local,
            })
            .collect())
    }
}
