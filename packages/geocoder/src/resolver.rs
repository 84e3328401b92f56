//! Ordered-fallback resolution of addresses to census block GEOIDs.
//!
//! The resolver owns one direct geocoder, an ordered list of coordinate
//! geocoders, and one reverse geocoder, and walks them as a short-circuit
//! chain: the direct strategy wins outright, otherwise the first
//! coordinate source to produce a lat/lng feeds a single reverse lookup.
//! A failure inside any strategy is logged and degrades to the next one;
//! only exhausting the whole chain yields `None`.

use async_trait::async_trait;
use fiber_map_geography_models::BlockGeoid;

use crate::census::CensusGeocoder;
use crate::google::GoogleGeocoder;
use crate::service_registry::{self, ProviderConfig};
use crate::{Coordinates, GeocodeError};

/// Resolves an address directly to a census block.
#[async_trait]
pub trait DirectGeocoder: Send + Sync {
    /// Returns the census block for an address, or `None` when the
    /// service has no match.
    async fn geocode_block(&self, address: &str) -> Result<Option<BlockGeoid>, GeocodeError>;
}

/// Resolves an address to coordinates.
#[async_trait]
pub trait CoordinateGeocoder: Send + Sync {
    /// Short provider name for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns coordinates for an address, or `None` when unmatched.
    async fn geocode_coordinates(&self, address: &str)
    -> Result<Option<Coordinates>, GeocodeError>;
}

/// Recovers the census block containing a coordinate pair.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Returns the census block at the coordinates, or `None` when the
    /// service cannot place them in one.
    async fn block_for_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<BlockGeoid>, GeocodeError>;
}

/// Multi-strategy address to census block GEOID resolver.
pub struct GeoidResolver {
    direct: Box<dyn DirectGeocoder>,
    coordinate_sources: Vec<Box<dyn CoordinateGeocoder>>,
    reverse: Box<dyn ReverseGeocoder>,
}

impl GeoidResolver {
    /// Assembles a resolver from explicit strategies. Coordinate sources
    /// are tried in the order given.
    #[must_use]
    pub fn new(
        direct: Box<dyn DirectGeocoder>,
        coordinate_sources: Vec<Box<dyn CoordinateGeocoder>>,
        reverse: Box<dyn ReverseGeocoder>,
    ) -> Self {
        Self {
            direct,
            coordinate_sources,
            reverse,
        }
    }

    /// Builds the production chain from the embedded service registry.
    ///
    /// The census client serves as the direct strategy, the reverse
    /// strategy, and the last-resort coordinate source. Commercial
    /// coordinate providers (Google) join the chain ahead of it, in
    /// registry priority order, and only when enabled with their API key
    /// environment variable set.
    ///
    /// # Panics
    ///
    /// Panics if the embedded registry has no enabled census service —
    /// the registry is compiled in, so this is a build defect rather
    /// than a runtime condition.
    #[must_use]
    pub fn from_registry() -> Self {
        let client = reqwest::Client::new();
        let mut census: Option<CensusGeocoder> = None;
        let mut coordinate_sources: Vec<Box<dyn CoordinateGeocoder>> = Vec::new();

        for service in service_registry::enabled_services() {
            match service.provider {
                ProviderConfig::Census {
                    base_url,
                    benchmark,
                    vintage,
                    timeout_ms,
                } => {
                    census = Some(CensusGeocoder::new(
                        client.clone(),
                        base_url,
                        benchmark,
                        vintage,
                        timeout_ms,
                    ));
                }
                ProviderConfig::Google {
                    base_url,
                    api_key_env,
                    timeout_ms,
                } => match std::env::var(&api_key_env) {
                    Ok(api_key) => coordinate_sources.push(Box::new(GoogleGeocoder::new(
                        client.clone(),
                        base_url,
                        api_key,
                        timeout_ms,
                    ))),
                    Err(_) => {
                        log::debug!("google geocoder disabled: {api_key_env} is not set");
                    }
                },
            }
        }

        let census = census.expect("service registry has no enabled census geocoder");
        coordinate_sources.push(Box::new(census.clone()));

        Self::new(
            Box::new(census.clone()),
            coordinate_sources,
            Box::new(census),
        )
    }

    /// Resolves a free-text address to its 2020 census block GEOID.
    ///
    /// `None` means every strategy was exhausted without a match — the
    /// normal outcome for unparseable or unplaceable addresses, not an
    /// error. An empty address short-circuits before any external call.
    pub async fn resolve(&self, address: &str) -> Option<BlockGeoid> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }

        if let Some(block) = self.direct_block(address).await {
            return Some(block);
        }

        log::debug!("direct census lookup missed for '{address}', trying coordinates");
        let coordinates = self.coordinates(address).await?;
        self.reverse_block(coordinates).await
    }

    async fn direct_block(&self, address: &str) -> Option<BlockGeoid> {
        match self.direct.geocode_block(address).await {
            Ok(block) => block,
            Err(e) => {
                log::warn!("direct geocode failed for '{address}': {e}");
                None
            }
        }
    }

    async fn coordinates(&self, address: &str) -> Option<Coordinates> {
        for source in &self.coordinate_sources {
            match source.geocode_coordinates(address).await {
                Ok(Some(coordinates)) => return Some(coordinates),
                Ok(None) => {
                    log::debug!("{} returned no coordinates for '{address}'", source.name());
                }
                Err(e) => {
                    log::warn!(
                        "{} coordinate lookup failed for '{address}': {e}",
                        source.name()
                    );
                }
            }
        }

        None
    }

    async fn reverse_block(&self, coordinates: Coordinates) -> Option<BlockGeoid> {
        match self.reverse.block_for_coordinates(coordinates).await {
            Ok(block) => block,
            Err(e) => {
                log::warn!(
                    "reverse geocode failed at ({}, {}): {e}",
                    coordinates.lat,
                    coordinates.lng
                );
                None
            }
        }
    }
}
