#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Broadband provider plan types and derived aggregation results.
//!
//! [`ProviderRecord`] mirrors one row of the FCC National Broadband Map
//! availability dataset: one row per (provider, location, plan). The
//! remaining types are computed per query by the aggregation engine and
//! never persisted.

pub mod labels;

use serde::{Deserialize, Serialize};

/// One provider/location/plan availability row, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    /// FCC registration number.
    pub frn: String,
    /// FCC provider identifier. May be empty in source data.
    pub provider_id: String,
    /// Consumer-facing brand name.
    pub brand_name: String,
    /// Broadband-serviceable location identifier.
    pub location_id: String,
    /// FCC technology code (see [`labels::technology_name`]).
    pub technology: u32,
    /// Maximum advertised download speed in Mbps.
    pub max_advertised_download_speed: u32,
    /// Maximum advertised upload speed in Mbps.
    pub max_advertised_upload_speed: u32,
    /// Whether the plan is marketed as low latency.
    pub low_latency: bool,
    /// Raw business/residential code (see [`labels::availability_type`]).
    pub business_residential_code: String,
    /// Two-letter USPS state code.
    pub state_usps: String,
    /// 15-digit 2020 census block GEOID.
    pub block_geoid: String,
    /// H3 resolution-8 cell containing the location.
    pub h3_res8_id: String,
}

/// An advertised speed, collapsed to a scalar when every plan in a group
/// advertises the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Speed {
    /// All plans in the group advertise this speed.
    Single(u32),
    /// Plans span a range of advertised speeds.
    Range {
        /// Slowest advertised speed in the group.
        min: u32,
        /// Fastest advertised speed in the group.
        max: u32,
    },
}

impl Speed {
    /// Collapses a min/max pair — a degenerate range becomes a scalar.
    #[must_use]
    pub const fn from_min_max(min: u32, max: u32) -> Self {
        if min == max {
            Self::Single(max)
        } else {
            Self::Range { min, max }
        }
    }
}

/// Download/upload speed summary for an aggregated provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedSummary {
    /// Advertised download speeds across the group.
    pub download: Speed,
    /// Advertised upload speeds across the group.
    pub upload: Speed,
}

/// One provider's aggregated presence at a census block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSearchResult {
    /// The representative plan row whose metadata is surfaced.
    pub provider: ProviderRecord,
    /// Advertised speed ranges across the group's plans.
    pub speeds: SpeedSummary,
    /// Human-readable technology label for the representative row.
    pub technology: String,
    /// Residential/business availability label.
    pub availability: String,
    /// Number of plan rows in the group.
    pub plan_count: usize,
}

/// A brand name with its plan-row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProvider {
    /// Consumer-facing brand name.
    pub name: String,
    /// Number of plan rows carrying this brand.
    pub count: u64,
}

/// Dataset-wide or per-block provider statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    /// Total plan rows in scope.
    pub total_providers: u64,
    /// Average advertised download speed, rounded to the nearest Mbps.
    pub average_download_speed: u64,
    /// Average advertised upload speed, rounded to the nearest Mbps.
    pub average_upload_speed: u64,
    /// Up to five brands ranked by plan-row count, descending.
    pub top_providers: Vec<TopProvider>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_range_collapses_to_scalar() {
        assert_eq!(Speed::from_min_max(1000, 1000), Speed::Single(1000));
        assert_eq!(
            Speed::from_min_max(940, 1000),
            Speed::Range {
                min: 940,
                max: 1000
            }
        );
    }

    #[test]
    fn speed_serializes_untagged() {
        let single = serde_json::to_value(Speed::Single(1000)).unwrap();
        assert_eq!(single, serde_json::json!(1000));

        let range = serde_json::to_value(Speed::Range {
            min: 940,
            max: 1000,
        })
        .unwrap();
        assert_eq!(range, serde_json::json!({ "min": 940, "max": 1000 }));
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = ProviderRecord {
            frn: "0001234567".to_string(),
            provider_id: "P100".to_string(),
            brand_name: "Acme Fiber".to_string(),
            location_id: "L1".to_string(),
            technology: 50,
            max_advertised_download_speed: 1000,
            max_advertised_upload_speed: 1000,
            low_latency: true,
            business_residential_code: "X".to_string(),
            state_usps: "WA".to_string(),
            block_geoid: "530330001001000".to_string(),
            h3_res8_id: "8828308281fffff".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["brandName"], "Acme Fiber");
        assert_eq!(json["maxAdvertisedDownloadSpeed"], 1000);
        assert_eq!(json["businessResidentialCode"], "X");
        assert_eq!(json["h3Res8Id"], "8828308281fffff");
    }
}
