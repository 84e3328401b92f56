//! Read-only query surface over the provider availability dataset.
//!
//! The storage engine itself is out of scope — anything that can answer
//! these four queries can back the engine. [`InMemoryProviderStore`] is
//! the reference implementation, used by the test suite and by
//! embeddings that load the dataset straight into memory.

use async_trait::async_trait;
use fiber_map_provider_models::ProviderRecord;
use thiserror::Error;

/// Error from a provider store query.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed to execute the query.
    #[error("Query error: {message}")]
    Query {
        /// Description of the failure.
        message: String,
    },
}

/// Row count and unrounded speed averages for a statistics scope.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanSummary {
    /// Number of plan rows in scope.
    pub total_plans: u64,
    /// Mean advertised download speed. Zero when no rows match.
    pub average_download_speed: f64,
    /// Mean advertised upload speed. Zero when no rows match.
    pub average_upload_speed: f64,
}

/// A brand name with the number of plan rows carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCount {
    /// Consumer-facing brand name.
    pub brand_name: String,
    /// Number of plan rows.
    pub count: u64,
}

/// Read-only queries the aggregation engine needs from the dataset.
#[async_trait]
pub trait ProviderStore: Send + Sync {
    /// Plan rows at a census block with both advertised speeds at or
    /// above the given floors.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    async fn plans_for_block(
        &self,
        block_geoid: &str,
        min_download: u32,
        min_upload: u32,
    ) -> Result<Vec<ProviderRecord>, StoreError>;

    /// Distinct brand names with availability in a state, matched
    /// case-insensitively on the two-letter USPS code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    async fn brands_in_state(&self, state_usps: &str) -> Result<Vec<String>, StoreError>;

    /// Row count and unrounded speed averages, dataset-wide or scoped
    /// to one census block.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    async fn plan_summary(&self, block_geoid: Option<&str>) -> Result<PlanSummary, StoreError>;

    /// Plan-row counts grouped by brand name, in first-encountered
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    async fn brand_counts(&self, block_geoid: Option<&str>) -> Result<Vec<BrandCount>, StoreError>;
}

/// A [`ProviderStore`] over an in-memory row set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderStore {
    records: Vec<ProviderRecord>,
}

impl InMemoryProviderStore {
    /// Creates a store over the given rows.
    #[must_use]
    pub const fn new(records: Vec<ProviderRecord>) -> Self {
        Self { records }
    }

    fn in_scope<'a>(
        &'a self,
        block_geoid: Option<&'a str>,
    ) -> impl Iterator<Item = &'a ProviderRecord> {
        self.records
            .iter()
            .filter(move |record| block_geoid.is_none_or(|geoid| record.block_geoid == geoid))
    }
}

#[async_trait]
impl ProviderStore for InMemoryProviderStore {
    async fn plans_for_block(
        &self,
        block_geoid: &str,
        min_download: u32,
        min_upload: u32,
    ) -> Result<Vec<ProviderRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|record| {
                record.block_geoid == block_geoid
                    && record.max_advertised_download_speed >= min_download
                    && record.max_advertised_upload_speed >= min_upload
            })
            .cloned()
            .collect())
    }

    async fn brands_in_state(&self, state_usps: &str) -> Result<Vec<String>, StoreError> {
        let mut brands: Vec<String> = Vec::new();
        for record in &self.records {
            if record.state_usps.eq_ignore_ascii_case(state_usps)
                && !brands.contains(&record.brand_name)
            {
                brands.push(record.brand_name.clone());
            }
        }

        Ok(brands)
    }

    #[allow(clippy::cast_precision_loss)]
    async fn plan_summary(&self, block_geoid: Option<&str>) -> Result<PlanSummary, StoreError> {
        let mut total = 0_u64;
        let mut download_sum = 0_u64;
        let mut upload_sum = 0_u64;

        for record in self.in_scope(block_geoid) {
            total += 1;
            download_sum += u64::from(record.max_advertised_download_speed);
            upload_sum += u64::from(record.max_advertised_upload_speed);
        }

        if total == 0 {
            return Ok(PlanSummary::default());
        }

        Ok(PlanSummary {
            total_plans: total,
            average_download_speed: download_sum as f64 / total as f64,
            average_upload_speed: upload_sum as f64 / total as f64,
        })
    }

    async fn brand_counts(&self, block_geoid: Option<&str>) -> Result<Vec<BrandCount>, StoreError> {
        let mut counts: Vec<BrandCount> = Vec::new();
        for record in self.in_scope(block_geoid) {
            match counts
                .iter_mut()
                .find(|count| count.brand_name == record.brand_name)
            {
                Some(count) => count.count += 1,
                None => counts.push(BrandCount {
                    brand_name: record.brand_name.clone(),
                    count: 1,
                }),
            }
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::record;

    #[tokio::test]
    async fn filters_by_block_and_speed_floor() {
        let store = InMemoryProviderStore::new(vec![
            record("Acme Fiber", "P100", "530330001001000", 1000, 1000),
            record("Acme Fiber", "P100", "530330001001000", 100, 20),
            record("Acme Fiber", "P100", "110010047011005", 1000, 1000),
        ]);

        let rows = store
            .plans_for_block("530330001001000", 900, 900)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].max_advertised_download_speed, 1000);
    }

    #[tokio::test]
    async fn distinct_brands_matched_case_insensitively() {
        let mut rows = vec![
            record("Acme Fiber", "P100", "530330001001000", 1000, 1000),
            record("Acme Fiber", "P100", "530330001001001", 1000, 1000),
            record("Beta Net", "P200", "530330001001000", 500, 500),
        ];
        rows[2].state_usps = "wa".to_string();
        let store = InMemoryProviderStore::new(rows);

        let brands = store.brands_in_state("WA").await.unwrap();
        assert_eq!(brands, vec!["Acme Fiber", "Beta Net"]);
    }

    #[tokio::test]
    async fn summary_averages_scoped_rows() {
        let store = InMemoryProviderStore::new(vec![
            record("Acme Fiber", "P100", "530330001001000", 1000, 1000),
            record("Beta Net", "P200", "530330001001000", 500, 100),
            record("Gamma Co", "P300", "110010047011005", 2000, 2000),
        ]);

        let summary = store
            .plan_summary(Some("530330001001000"))
            .await
            .unwrap();
        assert_eq!(summary.total_plans, 2);
        assert!((summary.average_download_speed - 750.0).abs() < f64::EPSILON);
        assert!((summary.average_upload_speed - 550.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn empty_scope_summary_is_zeroed() {
        let store = InMemoryProviderStore::default();
        let summary = store.plan_summary(None).await.unwrap();
        assert_eq!(summary, PlanSummary::default());
    }

    #[tokio::test]
    async fn brand_counts_keep_first_seen_order() {
        let store = InMemoryProviderStore::new(vec![
            record("Beta Net", "P200", "530330001001000", 500, 100),
            record("Acme Fiber", "P100", "530330001001000", 1000, 1000),
            record("Beta Net", "P200", "530330001001000", 300, 50),
        ]);

        let counts = store.brand_counts(None).await.unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].brand_name, "Beta Net");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].brand_name, "Acme Fiber");
        assert_eq!(counts[1].count, 1);
    }
}
