#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address to census block GEOID resolution for fiber availability
//! searches.
//!
//! Free-text addresses are resolved through a multi-strategy fallback
//! chain configured via TOML files in `services/`:
//!
//! 1. **Census direct geocode** (priority 1) — the geographies
//!    one-line-address endpoint returns the matched address together with
//!    its 2020 census block. Free, no API key, but strict about address
//!    formatting.
//! 2. **Google geocode** (priority 2) — tolerant of messy input; needs an
//!    API key. Only its lat/lng output is used.
//! 3. **Census forward geocode** — coordinate fallback when Google is
//!    unconfigured or misses.
//! 4. **Census reverse geocode** — recovers the census block containing
//!    whatever coordinates step 2/3 produced.
//!
//! Exhausting the chain is a `None` resolution, not an error — individual
//! provider failures are logged and absorbed by the next strategy.

pub mod address;
pub mod census;
pub mod google;
pub mod resolver;
pub mod service_registry;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A free-text address split into comma-delimited components.
///
/// Components are best-effort; missing segments are empty strings. The
/// original input is always preserved in `full`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street line (house number + street name).
    pub street: String,
    /// City name.
    pub city: String,
    /// State name or abbreviation.
    pub state: String,
    /// 5-digit ZIP code, optionally ZIP+4.
    pub zip_code: String,
    /// The original input string, untouched.
    pub full: String,
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Errors from a single geocoding call.
#[derive(Debug, Error)]
pub enum GeocodeError {
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
