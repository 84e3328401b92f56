//! Per-block grouping of plan rows into provider-level results.

use std::collections::HashMap;

use fiber_map_provider_models::{
    ProviderRecord, ProviderSearchResult, Speed, SpeedSummary, labels,
};

use crate::store::ProviderStore;
use crate::{FIBER_SPEED_FLOOR, ProviderError};

/// Collapses fiber-class plan rows at a census block into one result per
/// provider.
///
/// Rows below [`FIBER_SPEED_FLOOR`] in either direction are excluded
/// entirely. Surviving rows are stable-sorted by brand name ascending
/// then download speed descending, grouped by provider id (brand name
/// when the id is empty), and each group reduces to its representative
/// row, per-direction speed ranges, and plan count. The sort fixes which
/// row represents each group; ranges and counts are order-independent.
///
/// # Errors
///
/// Returns [`ProviderError`] if the store query fails.
pub async fn aggregate_by_geoid(
    store: &dyn ProviderStore,
    block_geoid: &str,
) -> Result<Vec<ProviderSearchResult>, ProviderError> {
    let mut rows = store
        .plans_for_block(block_geoid, FIBER_SPEED_FLOOR, FIBER_SPEED_FLOOR)
        .await?;

    rows.sort_by(|a, b| {
        a.brand_name.cmp(&b.brand_name).then_with(|| {
            b.max_advertised_download_speed
                .cmp(&a.max_advertised_download_speed)
        })
    });

    let plan_rows = rows.len();
    let results: Vec<ProviderSearchResult> =
        group_rows(rows).into_iter().filter_map(reduce_group).collect();
    log::debug!(
        "aggregated {plan_rows} fiber plan rows into {} providers at {block_geoid}",
        results.len()
    );

    Ok(results)
}

/// Distinct brand names with availability anywhere in a state, sorted
/// ascending. The two-letter code is matched case-insensitively.
///
/// # Errors
///
/// Returns [`ProviderError`] if the store query fails.
pub async fn find_by_state(
    store: &dyn ProviderStore,
    state_usps: &str,
) -> Result<Vec<String>, ProviderError> {
    let mut brands = store.brands_in_state(&state_usps.to_uppercase()).await?;
    brands.sort();
    Ok(brands)
}

/// Groups sorted rows by provider id (brand name fallback), preserving
/// first-encounter order.
fn group_rows(rows: Vec<ProviderRecord>) -> Vec<Vec<ProviderRecord>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<ProviderRecord>> = Vec::new();

    for row in rows {
        let key = if row.provider_id.is_empty() {
            row.brand_name.clone()
        } else {
            row.provider_id.clone()
        };

        match positions.get(&key) {
            Some(&idx) => groups[idx].push(row),
            None => {
                positions.insert(key, groups.len());
                groups.push(vec![row]);
            }
        }
    }

    groups
}

/// Reduces one provider's rows to a search result. Returns `None` only
/// for an empty group, which [`group_rows`] never produces.
fn reduce_group(group: Vec<ProviderRecord>) -> Option<ProviderSearchResult> {
    let download = Speed::from_min_max(
        group
            .iter()
            .map(|r| r.max_advertised_download_speed)
            .min()?,
        group
            .iter()
            .map(|r| r.max_advertised_download_speed)
            .max()?,
    );
    let upload = Speed::from_min_max(
        group.iter().map(|r| r.max_advertised_upload_speed).min()?,
        group.iter().map(|r| r.max_advertised_upload_speed).max()?,
    );
    let plan_count = group.len();
    let representative = group.into_iter().next()?;

    Some(ProviderSearchResult {
        speeds: SpeedSummary { download, upload },
        technology: labels::technology_name(representative.technology),
        availability: labels::availability_type(&representative.business_residential_code)
            .to_string(),
        plan_count,
        provider: representative,
    })
}
