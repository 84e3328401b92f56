//! Dataset statistics.

use fiber_map_provider_models::{ProviderStats, TopProvider};

use crate::ProviderError;
use crate::store::ProviderStore;

/// Maximum entries in the top-provider ranking.
pub const TOP_PROVIDER_LIMIT: usize = 5;

/// Computes plan-row statistics, dataset-wide (`None`) or scoped to one
/// census block.
///
/// Unlike per-address search, no speed floor applies — statistics cover
/// every technology in the dataset. Averages are rounded to the nearest
/// Mbps. An empty scope yields zeroed statistics and an empty top list,
/// never an error.
///
/// # Errors
///
/// Returns [`ProviderError`] if a store query fails.
pub async fn compute_stats(
    store: &dyn ProviderStore,
    block_geoid: Option<&str>,
) -> Result<ProviderStats, ProviderError> {
    let summary = store.plan_summary(block_geoid).await?;
    let mut ranked = store.brand_counts(block_geoid).await?;

    // Stable sort keeps first-seen grouping order for equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_PROVIDER_LIMIT);

    Ok(ProviderStats {
        total_providers: summary.total_plans,
        average_download_speed: round_to_mbps(summary.average_download_speed),
        average_upload_speed: round_to_mbps(summary.average_upload_speed),
        top_providers: ranked
            .into_iter()
            .map(|count| TopProvider {
                name: count.brand_name,
                count: count.count,
            })
            .collect(),
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_mbps(value: f64) -> u64 {
    value.round() as u64
}
