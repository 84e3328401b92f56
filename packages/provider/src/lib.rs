#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Provider aggregation engine.
//!
//! Collapses raw per-plan availability rows into provider-level results
//! for a census block and computes dataset statistics. Rows come from a
//! read-only [`store::ProviderStore`]; this crate owns the grouping,
//! speed-range, and ranking semantics.

pub mod aggregate;
pub mod stats;
pub mod store;

use thiserror::Error;

/// Minimum advertised speed (Mbps, both directions) for a plan row to
/// count as fiber-class in per-address search results.
///
/// Dataset statistics deliberately do not apply this floor — they cover
/// every technology.
pub const FIBER_SPEED_FLOOR: u32 = 900;

/// Errors from provider aggregation operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The underlying store query failed.
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
}
